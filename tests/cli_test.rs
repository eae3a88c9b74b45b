use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

fn scenario(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", json).unwrap();
    file
}

#[test]
fn test_cli_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!("express-checkout"));
    cmd.arg("tests/fixtures/approve_and_deposit.json");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(r#""outcome": "success""#))
        .stdout(predicate::str::contains(r#""reference_number": "8SC56973LM923823H""#))
        .stdout(predicate::str::contains(r#""paypal_payer_id": "95HR9CM6D56Q2""#));

    Ok(())
}

#[test]
fn test_cli_first_approval_redirects_to_sandbox() {
    let file = scenario(
        r#"{
            "transaction": {"type": "approve", "requested_amount": "10.00"},
            "payment": {"currency": "USD", "approved_amount": "10.00"},
            "responses": [
                {"call": "set_express_checkout", "fields": {"ACK": "Success", "TOKEN": "EC-1"}}
            ]
        }"#,
    );

    let mut cmd = Command::new(cargo_bin!("express-checkout"));
    cmd.arg(file.path())
        .arg("--sandbox")
        .arg("--return-url")
        .arg("https://shop.example/return")
        .arg("--cancel-url")
        .arg("https://shop.example/cancel")
        .env_remove("RUST_LOG");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(r#""outcome": "action_required""#))
        .stdout(predicate::str::contains(
            "https://www.sandbox.paypal.com/cgi-bin/webscr?cmd=_express-checkout&token=EC-1",
        ))
        .stdout(predicate::str::contains(r#""return_url": "https://shop.example/return""#));
}

#[test]
fn test_cli_reads_urls_from_environment() {
    let file = scenario(
        r#"{
            "transaction": {"type": "approve", "requested_amount": "10.00"},
            "payment": {"currency": "USD", "approved_amount": "10.00"},
            "responses": [
                {"call": "set_express_checkout", "fields": {"ACK": "Success", "TOKEN": "EC-2"}}
            ]
        }"#,
    );

    let mut cmd = Command::new(cargo_bin!("express-checkout"));
    cmd.arg(file.path())
        .env("EXPRESS_CHECKOUT_RETURN_URL", "https://env.example/return")
        .env("EXPRESS_CHECKOUT_CANCEL_URL", "https://env.example/cancel");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(r#""cancel_url": "https://env.example/cancel""#));
}

#[test]
fn test_cli_reports_missing_return_url() {
    let file = scenario(
        r#"{
            "transaction": {"type": "approve", "requested_amount": "10.00"},
            "payment": {"currency": "USD", "approved_amount": "10.00"}
        }"#,
    );

    let mut cmd = Command::new(cargo_bin!("express-checkout"));
    cmd.arg(file.path())
        .env_remove("EXPRESS_CHECKOUT_RETURN_URL")
        .env_remove("EXPRESS_CHECKOUT_CANCEL_URL");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(r#""kind": "configuration""#))
        .stdout(predicate::str::contains(r#""reason_code": "MissingReturnUrl""#))
        .stdout(predicate::str::contains(r#""requests": []"#));
}

#[test]
fn test_cli_fails_when_script_runs_out() {
    let file = scenario(
        r#"{
            "transaction": {"type": "reverse_approval", "requested_amount": "10.00"},
            "payment": {
                "currency": "USD",
                "approved_amount": "10.00",
                "transactions": [
                    {"type": "approve", "requested_amount": "10.00", "reference_number": "AUTH-1"}
                ]
            }
        }"#,
    );

    let mut cmd = Command::new(cargo_bin!("express-checkout"));
    cmd.arg(file.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("no scripted response for DoVoid"));
}

#[test]
fn test_cli_rejects_malformed_scenario() {
    let file = scenario(r#"{"transaction": "#);

    let mut cmd = Command::new(cargo_bin!("express-checkout"));
    cmd.arg(file.path());

    cmd.assert().failure().stderr(predicate::str::contains("JSON error"));
}
