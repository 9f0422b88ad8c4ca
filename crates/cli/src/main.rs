use std::io;

use storefront_cli::{Catalog, Config, Shell};

fn main() -> anyhow::Result<()> {
    storefront_observability::init();

    let config = Config::from_env();
    let store = Catalog::from_config(&config)?.build()?;
    tracing::info!(
        source = %config
            .catalog_path
            .as_deref()
            .map_or("built-in seed".into(), |p| p.display().to_string()),
        products = store.len(),
        "catalog loaded"
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    Shell::new(store, stdin.lock(), stdout.lock()).run()?;
    Ok(())
}
