use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    mrello::cli::run().await
}
