use vivarium::{AppConfig, run};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(error) = run(AppConfig::new()) {
        log::error!("event loop failed: {error}");
        std::process::exit(1);
    }
}
