use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    extpack_lib::main().await
}
