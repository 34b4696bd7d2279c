// SPDX-License-Identifier: MIT OR Apache-2.0

//! Basic usage example for the inicfg crate.
//!
//! This example demonstrates:
//! - Parsing an INI deployment document from a string
//! - Retrieving configuration values with type coercion
//! - DEFAULT-section fallback and `%(name)s` interpolation
//! - Validating a document against the deployment schema
//!
//! To run this example:
//! ```bash
//! cargo run --example basic_usage
//! ```

use inicfg::prelude::*;

const DEPLOY: &str = "\
[DEFAULT]
env = production

[app:main]
use = egg:myapp
datastore.uri = memory://%(env)s
retry.attempts = 5
debug = no

[server:main]
use = egg:waitress#main
listen = 127.0.0.1:6543 [::1]:6543
";

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    println!("=== inicfg: Basic Usage ===\n");

    let service = ConfigService::builder()
        .with_string(DEPLOY)
        .with_schema(DeploymentSettings::schema().clone())
        .build()?;

    println!("--- Example 1: Typed Values ---");
    println!("use            = {}", service.get_string("app:main", "use")?);
    println!(
        "retry.attempts = {}",
        service.get_int("app:main", "retry.attempts")?
    );
    println!("debug          = {}", service.get_bool("app:main", "debug")?);

    println!("\n--- Example 2: DEFAULT Fallback and Interpolation ---");
    // `env` lives in [DEFAULT]; the datastore URI interpolates it.
    println!("env            = {}", service.get_string("app:main", "env")?);
    println!(
        "datastore.uri  = {}",
        service.get_string("app:main", "datastore.uri")?
    );

    println!("\n--- Example 3: Typed Settings ---");
    let settings = DeploymentSettings::from_document(&service.snapshot())?;
    println!("application    = {}", settings.app.use_spec);
    for pair in &settings.server.listen {
        println!("listen on      {pair}");
    }

    println!("\n--- Example 4: Batch Validation ---");
    let broken = ConfigService::builder()
        .with_string("[app:main]\nretry.attempts = lots\n")
        .with_schema(DeploymentSettings::schema().clone())
        .build();
    match broken {
        Ok(_) => println!("unexpectedly valid"),
        Err(err) => println!("refused to start:\n{err}"),
    }

    Ok(())
}
