//! # Common Test Utilities
//!
//! This module centralizes the test harness used across the
//! `workflow-importer-server` integration tests:
//!
//! - `TestApp`: spawns a real server on a random port with temporary storage
//!   directories, plus a `reqwest` client pointed at it.
//! - `encode_png`: builds minimal PNG fixtures carrying the given text
//!   chunks, the same way the host tool embeds workflow metadata.

// Allow unused code because this is a test utility module, and not all
// helpers are used by every test file that includes it.
#![allow(unused)]

use anyhow::Result;
use std::{net::SocketAddr, path::PathBuf};
use tokio::{net::TcpListener, task::JoinHandle};
use workflow_importer_server::{
    config::{AppConfig, DirsConfig},
    router::create_router,
    state::build_app_state,
};

/// A harness for end-to-end testing of the Axum server.
pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    _storage: tempfile::TempDir,
    _server_handle: JoinHandle<()>,
}

impl TestApp {
    /// Spawns the application server and returns a `TestApp` instance.
    pub async fn spawn() -> Result<Self> {
        // `try_init` is used to prevent panic if the logger is already initialized.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();

        let storage = tempfile::tempdir()?;
        let config = AppConfig {
            port: 0,
            dirs: DirsConfig {
                input: storage.path().join("input").to_string_lossy().into_owned(),
                output: storage.path().join("output").to_string_lossy().into_owned(),
                temp: storage.path().join("temp").to_string_lossy().into_owned(),
            },
            max_upload_bytes: 10 * 1024 * 1024,
        };
        let input_dir = PathBuf::from(&config.dirs.input);
        let output_dir = PathBuf::from(&config.dirs.output);

        // `build_app_state` also creates the storage directories.
        let app_state = build_app_state(config).await?;

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;
        let address = format!("http://{addr}");

        let app = create_router(app_state);
        let server_handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("Server error: {e}");
            }
        });

        Ok(Self {
            address,
            client: reqwest::Client::new(),
            input_dir,
            output_dir,
            _storage: storage,
            _server_handle: server_handle,
        })
    }
}

/// Encodes a 1x1 grayscale PNG carrying the given tEXt chunks.
pub fn encode_png(text: &[(&str, &str)]) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buf, 1, 1);
        encoder.set_color(png::ColorType::Grayscale);
        encoder.set_depth(png::BitDepth::Eight);
        for (key, value) in text {
            encoder
                .add_text_chunk(key.to_string(), value.to_string())
                .expect("tEXt chunk");
        }
        let mut writer = encoder.write_header().expect("PNG header");
        writer.write_image_data(&[0]).expect("PNG image data");
        writer.finish().expect("PNG trailer");
    }
    buf
}
