use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "k3-console")]
#[command(about = "Interactive console for a remote k3 evaluator")]
pub struct AppArgs {
    #[arg(
        long,
        default_value = "ws://127.0.0.1:3000/ws",
        help = "Websocket URL of the evaluator shim"
    )]
    pub url: String,

    #[arg(long, help = "Preload the prompt with this text")]
    pub input: Option<String>,
}

impl AppArgs {
    pub fn from_cli() -> Self {
        <Self as Parser>::parse()
    }
}
