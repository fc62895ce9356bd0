//! Basic example demonstrating the Open Telekom Cloud API client.
//!
//! Run with:
//! ```
//! OTC_AUTH_TOKEN=token OTC_PROJECT_ID=project cargo run --example basic
//! ```

use otcapi::{
    DcsBackup, DcsInstance, DmsQueue, DmsQuota, FgsFunction, Get, List, ListOptions, OtcClient,
    OtcError,
};

#[tokio::main]
async fn main() -> otcapi::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    println!("Creating client...");
    let client = OtcClient::from_env()?;
    println!("Project {} in {}", client.project_id(), client.region());

    // Walk every cache instance, 20 per page
    println!("\n--- DCS Instances ---");
    let mut instances = DcsInstance::list(&client, ListOptions::new().limit(20))?;
    let mut first_instance = None;
    while let Some(instance) = instances.next().await {
        match instance {
            Ok(instance) => {
                println!(
                    "  - {} {} ({})",
                    instance.id().unwrap_or_default(),
                    instance.get_str("name").unwrap_or("-"),
                    instance.get_str("status").unwrap_or("unknown")
                );
                first_instance.get_or_insert(instance);
            }
            // A record with an unexpected value does not end the walk.
            Err(err @ OtcError::Coercion { .. }) => println!("  ! skipped: {err}"),
            Err(err) => return Err(err),
        }
    }

    // Backups are listed under their instance
    if let Some(instance) = first_instance {
        let instance_id = instance.id().unwrap_or_default();
        println!("\n--- Backups of {instance_id} ---");
        let backups = DcsBackup::list_all(
            &client,
            ListOptions::new().param("instance_id", instance_id.clone()),
        )
        .await?;
        println!("Found {} backups", backups.len());
        for backup in backups.iter().take(5) {
            println!(
                "  - {} {}",
                backup.get_str("name").unwrap_or("-"),
                backup.get_str("status").unwrap_or("unknown")
            );
        }
    }

    // A nested container, returned in one page
    println!("\n--- DMS Quotas ---");
    for quota in DmsQuota::list_all(&client, ListOptions::new()).await? {
        println!(
            "  {}: {} of {}",
            quota.get_str("type").unwrap_or("-"),
            quota.get_i64("used").unwrap_or(0),
            quota.get_i64("quota").unwrap_or(0)
        );
    }

    // Queues, then one of them in detail
    println!("\n--- DMS Queues ---");
    let queues = DmsQueue::list_page(&client, ListOptions::new()).await?;
    println!("Found {} queues", queues.len());
    if let Some(queue) = queues.items.first() {
        let queue = DmsQueue::get(&client, &queue.id().unwrap_or_default()).await?;
        println!(
            "  {} mode={} retention={}h",
            queue.get_str("name").unwrap_or("-"),
            queue.get_str("queue_mode").unwrap_or("-"),
            queue.get_i64("retention_hours").unwrap_or(0)
        );
    }

    // Marker-paged functions, first page only
    println!("\n--- Functions (first page) ---");
    let page = FgsFunction::list_page(&client, ListOptions::new().limit(10)).await?;
    for function in &page {
        println!(
            "  - {} ({})",
            function.get_str("name").unwrap_or("-"),
            function.get_str("runtime").unwrap_or("-")
        );
    }
    if let Some(marker) = &page.next_marker {
        println!("More functions follow; resume with marker {marker}");
    }

    println!("\nDone!");
    Ok(())
}
