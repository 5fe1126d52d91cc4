use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// The port for the worker to listen on.
    #[arg(short, long, default_value = "8040")]
    pub port: u16,
}
