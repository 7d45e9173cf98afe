use anyhow::Context;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = spindle::ViewerConfig::from_env();
    spindle::run(config).context("viewer exited with an error")
}
