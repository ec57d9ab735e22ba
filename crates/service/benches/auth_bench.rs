use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use service::auth::{AuthService, RegistrationPolicy, Role, TokenService};
use service::auth::repository::mock::MockCredentialStore;
use service::auth::domain::{RegisterInput, LoginInput};
use service::schedule::validate_time;

fn bench_login(c: &mut Criterion) {
    let repo = Arc::new(MockCredentialStore::default());
    let svc = AuthService::new(repo, TokenService::new("secret", 900), RegistrationPolicy::default());

    // pre-create user outside of the benchmark using a tokio runtime
    let rt = tokio::runtime::Runtime::new().unwrap();
    let _ = rt.block_on(svc.register(RegisterInput { email: "bench@example.com".into(), password: "Benchmark1".into() }));

    c.bench_function("auth_login_verify", |b| {
        b.iter(|| {
            let _ = rt.block_on(svc.login(LoginInput { email: "bench@example.com".into(), password: "Benchmark1".into() })).unwrap();
        });
    });
}

fn bench_token_verify(c: &mut Criterion) {
    let tokens = TokenService::new("secret", 900);
    let (token, _) = tokens.issue(uuid::Uuid::new_v4(), Role::Admin).unwrap();
    c.bench_function("token_verify", |b| b.iter(|| tokens.verify(&token).unwrap()));
    c.bench_function("schedule_validate", |b| b.iter(|| validate_time("16:30").is_ok()));
}

criterion_group!(benches, bench_login, bench_token_verify);
criterion_main!(benches);
