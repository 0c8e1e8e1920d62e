use solar_ann::pipeline::{run, PipelineConfig};

fn main() {
    tracing_subscriber::fmt::init();

    let config = PipelineConfig::default();
    match run(&config) {
        Ok(predictions) => {
            for p in predictions {
                println!("{}", p);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}
