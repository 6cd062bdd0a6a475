use env_logger::Env;

/// Filter variable checked before `RUST_LOG`.
pub const LOG_ENV: &str = "RING_LOG";

pub fn init_logger() {
    let env = Env::default().filter_or(LOG_ENV, default_filter());
    env_logger::Builder::from_env(env).init();
}

pub fn init_test_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn default_filter() -> String {
    std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string())
}
