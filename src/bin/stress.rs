use seg_tree::stress::{self, StressConfig};

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = StressConfig::from_env()?;
    println!("stress config: {:?}", config);

    let report = stress::run(&config)?;
    print!("{}", report);
    println!("all checks passed");

    Ok(())
}
