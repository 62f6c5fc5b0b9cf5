#[tokio::main]
async fn main() {
  if let Err(e) = pet_care_client::run().await {
    eprintln!("pet-care-client: {}", e);
    std::process::exit(1);
  }
}
