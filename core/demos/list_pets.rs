//! Lists pets from the server named by `PETSTORE_BASE_URL`.
//!
//! Set `ASYNC` to use the async client and `PETSTORE_DEBUG` to print the
//! request/response trace.

use petstore::{AsyncPetstoreClient, PetstoreClient, PetstoreError};

fn run_blocking() -> Result<(), PetstoreError> {
    let client = PetstoreClient::from_env()?;
    let pets = client.list_pets(None)?;
    println!("{pets:?}");
    Ok(())
}

async fn run_async() -> Result<(), PetstoreError> {
    let client = AsyncPetstoreClient::from_env()?;
    let pets = client.list_pets(None).await?;
    println!("{pets:?}");
    client.close();
    Ok(())
}

fn main() -> Result<(), PetstoreError> {
    if std::env::var_os("PETSTORE_DEBUG").is_some() {
        petstore::enable_debug_logging();
    }
    if std::env::var_os("ASYNC").is_some() {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|e| PetstoreError::Configuration(format!("failed to start runtime: {e}")))?;
        runtime.block_on(run_async())
    } else {
        run_blocking()
    }
}
