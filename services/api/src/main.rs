use driver_hub_api::run;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("driver hub error: {err}");
        std::process::exit(1);
    }
}
