#![allow(dead_code)]

use proforma_service::config::{Config, DatabaseConfig, ServerConfig};
use proforma_service::startup::Application;
use secrecy::Secret;

pub use proforma_service::services::demo::{
    SAMPLE_CLIENT_ID, SAMPLE_INVOICE_ID, SAMPLE_ITEM_IDS, SAMPLE_VENDOR_ID,
};

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub client: reqwest::Client,
}

fn test_config(database_url: Option<String>) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0, // Random port
        },
        database: DatabaseConfig {
            url: database_url.map(Secret::new),
            max_connections: 5,
            min_connections: 1,
            run_migrations: true,
        },
        service_name: "proforma-service-test".to_string(),
        log_level: "warn".to_string(),
        otlp_endpoint: None,
    }
}

impl TestApp {
    /// Spawn the service in demo mode; no database needed.
    pub async fn spawn() -> Self {
        Self::spawn_with(test_config(None)).await
    }

    /// Spawn against PostgreSQL when `TEST_DATABASE_URL` is set.
    pub async fn spawn_with_database() -> Option<Self> {
        let url = std::env::var("TEST_DATABASE_URL").ok()?;
        Some(Self::spawn_with(test_config(Some(url))).await)
    }

    async fn spawn_with(config: Config) -> Self {
        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            client,
        }
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_json(&self, path: &str, body: &serde_json::Value) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.address, path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn delete(&self, path: &str) -> reqwest::Response {
        self.client
            .delete(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request")
    }
}

pub fn client_body(name: &str) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "email": "info@techsolutions.co.ke",
        "phone": "+254 700 000 000",
        "address": "123 Innovation Street",
        "city": "Nairobi",
        "country": "Kenya",
        "tin_number": "P051234567X"
    })
}

pub fn invoice_body(customer_name: &str) -> serde_json::Value {
    serde_json::json!({
        "customer_name": customer_name,
        "customer_address": "P.O.Box 100",
        "customer_country": "Tanzania",
        "remarks": "Being sale of toners",
        "items": [
            { "particulars": "Toner - 106A", "qty": 2, "unit": "pcs", "price_per_unit": 120000 },
            { "particulars": "Toner - 151A", "qty": 2, "unit": "pcs", "price_per_unit": 300000 }
        ]
    })
}
