#[tokio::main]
async fn main() -> anyhow::Result<()> {
    barcode_lookup_lib::run().await
}
