/// Persondex API demo
///
/// Loads a handful of rows, runs each lookup, then deletes a user.
/// Run with `RUST_LOG=debug` to see the per-record log lines.

use persondex::{Config, Directory};
use tracing_subscriber::EnvFilter;

const ROWS: &str = r#"[
    {"Id": 1, "Name": "Ann Lee", "DOB": "17/05/2000", "Country": "Norway", "Email": "ann@example.com"},
    {"Id": 2, "Name": "Ann", "DOB": "1991-03-02", "Country": "Peru", "Email": "ann2@example.com"},
    {"Id": 3, "Name": "Leelani Kai", "DOB": "1985-11-23", "Country": "USA", "Email": "leelani@example.com"},
    {"Id": 4, "Name": "Broken Row", "DOB": "not a date", "Country": "USA", "Email": ""}
]"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let directory = Directory::new(Config::default());

    let report = directory.load_json(ROWS)?;
    println!("Loaded {} rows, skipped {}", report.inserted, report.skipped);

    if let Some(user) = directory.get_user_by_id("1") {
        println!("By id 1: {} <{}>", user.name, user.email);
    }

    println!("In USA: {}", directory.get_users_by_country("USA").len());

    for query in ["Ann Lee", "lee", "an"] {
        let names: Vec<String> = directory
            .get_users_by_name(query)
            .iter()
            .map(|u| u.name.clone())
            .collect();
        println!("Name '{}': {:?}", query, names);
    }

    println!("Age 30 (born this month): {}", directory.get_users_by_age(30).len());

    directory.delete_user("1");
    println!("After delete, 'ann': {}", directory.get_users_by_name("ann").len());

    println!("{}", serde_json::to_string_pretty(&directory.stats())?);
    Ok(())
}
