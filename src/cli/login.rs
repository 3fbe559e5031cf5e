use catalog_sync::core::credentials::{
    CredentialStore, CMP_API_KEY, CMP_SECRET_KEY, RANCHER_ACCESS_KEY, RANCHER_SECRET_KEY,
};
use catalog_sync::core::{CatalogError, CatalogResult};
use dialoguer::{Input, Password};

fn prompt(label: &str) -> CatalogResult<String> {
    Input::new()
        .with_prompt(label)
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.trim().is_empty() {
                Err("Value cannot be empty")
            } else {
                Ok(())
            }
        })
        .interact_text()
        .map(|value: String| value.trim().to_string())
        .map_err(|e| CatalogError::Credentials(format!("Failed to read input: {}", e)))
}

fn prompt_secret(label: &str) -> CatalogResult<String> {
    Password::new()
        .with_prompt(label)
        .interact()
        .map_err(|e| CatalogError::Credentials(format!("Failed to read input: {}", e)))
}

pub fn run() -> CatalogResult<()> {
    println!("CMP and Rancher Login");
    println!("Credentials are stored in the OS keychain.");
    if CredentialStore::exists(CMP_API_KEY) {
        println!("Existing credentials will be replaced.");
    }
    println!();

    let api_key = prompt("CMP API key")?;
    let secret_key = prompt_secret("CMP secret key")?;
    let access_key = prompt("Rancher access key")?;
    let rancher_secret = prompt_secret("Rancher secret key")?;

    CredentialStore::store(CMP_API_KEY, &api_key)?;
    CredentialStore::store(CMP_SECRET_KEY, &secret_key)?;
    CredentialStore::store(RANCHER_ACCESS_KEY, &access_key)?;
    CredentialStore::store(RANCHER_SECRET_KEY, &rancher_secret)?;

    println!();
    println!("✓ Credentials stored securely");
    println!("  CMP API key: {}", api_key);
    println!("  Rancher access key: {}", access_key);

    Ok(())
}
