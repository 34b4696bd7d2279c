// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dynamic configuration reload example.
//!
//! This example demonstrates:
//! - Watching a deployment file for changes
//! - Swapping in a replacement document once it parses and validates
//! - Keeping the previous document when a rewrite is broken
//!
//! To run this example:
//! ```bash
//! cargo run --example dynamic_reload --features reload
//! ```

use inicfg::prelude::*;
use std::fs;
use std::thread;
use std::time::Duration;

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    println!("=== inicfg: Dynamic Reload ===\n");

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("deploy.ini");
    fs::write(&path, "[app:main]\nuse = egg:myapp\nmessage = original\n")?;

    let service = ConfigService::builder().with_file(&path)?.build()?;
    service.watch()?;

    println!("Watching {}", path.display());
    println!(
        "Initial message: {}\n",
        service.get_string("app:main", "message")?
    );

    for i in 1..=3 {
        thread::sleep(Duration::from_millis(500));
        fs::write(
            &path,
            format!("[app:main]\nuse = egg:myapp\nmessage = update {i}\n"),
        )?;
        // Give the debounced watcher time to pick the change up.
        thread::sleep(Duration::from_secs(1));
        println!(
            "message is now:  {}",
            service.get_string("app:main", "message")?
        );
    }

    // A rewrite that no longer parses leaves the last good document in place.
    fs::write(&path, "message = broken, no section header\n")?;
    thread::sleep(Duration::from_secs(1));
    println!(
        "\nAfter a broken rewrite the service still serves: {}",
        service.get_string("app:main", "message")?
    );

    Ok(())
}
