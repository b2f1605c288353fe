use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = mondap_api::Args::parse();
	mondap_api::run(args).await
}
