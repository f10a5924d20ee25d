//! # Upload Extraction Endpoint Tests
//!
//! Integration tests for `POST /workflow_importer/extract_from_data`: raw
//! image bytes arrive in an `image` multipart field and the response carries
//! the classified extraction result.

mod common;

use anyhow::Result;
use common::{encode_png, TestApp};
use reqwest::multipart::{Form, Part};
use serde_json::json;

fn image_form(bytes: Vec<u8>) -> Form {
    Form::new().part("image", Part::bytes(bytes).file_name("test.png"))
}

#[tokio::test]
async fn test_extract_from_upload_success() -> Result<()> {
    let app = TestApp::spawn().await?;
    let workflow = r#"{"nodes":[],"extra":{"comfyui_version":"0.3.10"}}"#;
    let prompt = r#"{"1":{"class_type":"KSampler","inputs":{}}}"#;
    let png = encode_png(&[("workflow", workflow), ("prompt", prompt)]);

    let response = app
        .client
        .post(format!("{}/workflow_importer/extract_from_data", app.address))
        .multipart(image_form(png))
        .send()
        .await?;

    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["workflow"]["nodes"], json!([]));
    assert_eq!(body["prompt"]["1"]["class_type"], json!("KSampler"));
    assert_eq!(body["error"], json!(null));
    assert_eq!(body["info"]["source"], json!("comfyui"));
    assert_eq!(body["info"]["source_version"], json!("0.3.10"));
    assert_eq!(body["info"]["has_workflow"], json!(true));
    assert_eq!(body["info"]["has_prompt"], json!(true));
    assert_eq!(body["info"]["raw_keys"], json!(["workflow", "prompt"]));
    Ok(())
}

#[tokio::test]
async fn test_misnamed_field_is_rejected() -> Result<()> {
    let app = TestApp::spawn().await?;
    let png = encode_png(&[("workflow", r#"{"nodes":[]}"#)]);
    let form = Form::new().part("file", Part::bytes(png).file_name("test.png"));

    let response = app
        .client
        .post(format!("{}/workflow_importer/extract_from_data", app.address))
        .multipart(form)
        .send()
        .await?;

    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await?;
    assert!(body["error"].as_str().unwrap().contains("image"));
    Ok(())
}

#[tokio::test]
async fn test_non_png_upload_is_rejected() -> Result<()> {
    let app = TestApp::spawn().await?;

    let response = app
        .client
        .post(format!("{}/workflow_importer/extract_from_data", app.address))
        .multipart(image_form(b"not a png at all".to_vec()))
        .send()
        .await?;

    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["success"], json!(false));
    assert!(body["error"].as_str().unwrap().contains("PNG"));
    Ok(())
}

#[tokio::test]
async fn test_automatic1111_image_reports_foreign_format() -> Result<()> {
    let app = TestApp::spawn().await?;
    let png = encode_png(&[("parameters", "Steps: 20, Sampler: Euler")]);

    let response = app
        .client
        .post(format!("{}/workflow_importer/extract_from_data", app.address))
        .multipart(image_form(png))
        .send()
        .await?;

    // A foreign-format image is a classified result, not an HTTP error.
    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["info"]["source"], json!("automatic1111"));
    assert!(body["error"].as_str().unwrap().contains("Automatic1111"));
    Ok(())
}

#[tokio::test]
async fn test_png_without_metadata_reports_absent() -> Result<()> {
    let app = TestApp::spawn().await?;
    let png = encode_png(&[]);

    let response = app
        .client
        .post(format!("{}/workflow_importer/extract_from_data", app.address))
        .multipart(image_form(png))
        .send()
        .await?;

    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["info"]["source"], json!("unknown"));
    assert_eq!(body["error"], json!("No metadata found in image"));
    Ok(())
}
