//! Fully decorated handlers, invoked the way a function runtime would.

use lambda_decorators::config::{ConfigLoader, InMemoryParameterStore};
use lambda_decorators::prelude::*;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

const TOKEN: &str = concat!(
    "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.",
    "eyJzdWIiOiIxMjM0NTY3ODkwIiwibmFtZSI6IkpvaG4gRG9lIiwiaWF0IjoxNTE2MjM5MDIyfQ.",
    "SflKxwRJSMeKKF2QT4fwpMeJf36POk6yJV_adQssw5c"
);

#[derive(Debug, Deserialize)]
struct Payment {
    user_id: String,
    currency: String,
    amount: f64,
    #[serde(default)]
    reference: Option<String>,
}

fn payment_handler() -> Decorated {
    let registry = Arc::new(DecoderRegistry::new());
    let requests = vec![
        ExtractionRequest::builder("/headers/Authorization[jwt]/sub")
            .target("user_id")
            .validator(Mandatory::new())
            .build(&registry)
            .unwrap(),
        ExtractionRequest::builder("/body[json]/currency")
            .validator(Mandatory::new())
            .validator(CurrencyValidator::new())
            .build(&registry)
            .unwrap(),
        ExtractionRequest::builder("/body[json]/amount")
            .validator(Mandatory::new())
            .validator(Minimum::new(0.01))
            .build(&registry)
            .unwrap(),
        ExtractionRequest::builder("/body[json]/reference")
            .validator(MaxLength::new(12))
            .build(&registry)
            .unwrap(),
    ];

    Decorated::builder(|inv: Invocation| -> HandlerResult {
        let payment: Payment = inv.deserialize_args().map_err(anyhow::Error::from)?;
        if payment.amount > 1000.0 {
            return Err(HandlerError::forbidden("amount over limit"));
        }
        Ok(Response::new(StatusCode::CREATED).with_body(json!({
            "user": payment.user_id,
            "currency": payment.currency,
            "amount": payment.amount,
            "reference": payment.reference,
        })))
    })
    .with(HandleExceptions::new(vec![ExceptionHandler::category(
        ErrorCategory::Forbidden,
    )
    .friendly_message("Payment not allowed")
    .status(StatusCode::FORBIDDEN)]))
    .with(CorsDecorator::new().allow_origin("*"))
    .with(ResponseBodyAsJson::new())
    .with(LogDecorator::new().parameters(true).response(true))
    .with(ExtractDecorator::from_event(registry, requests).group_errors(true))
    .build()
}

fn event(body: &Value) -> Value {
    json!({
        "headers": {"Authorization": TOKEN},
        "body": body.to_string(),
    })
}

fn message(response: &Response) -> Value {
    let body: Value = serde_json::from_str(response.body().as_text().unwrap()).unwrap();
    body["message"].clone()
}

#[test]
fn payment_accepted() {
    let body = json!({"currency": "GBP", "amount": 12.5});
    let response = payment_handler()
        .call(Invocation::new(event(&body), json!({})))
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response.header("access-control-allow-origin"), Some("*"));
    let sent: Value = serde_json::from_str(response.body().as_text().unwrap()).unwrap();
    assert_eq!(
        sent,
        json!({"user": "1234567890", "currency": "GBP", "amount": 12.5, "reference": null})
    );
}

#[test]
fn payment_rejected_with_every_field_error() {
    let body = json!({"currency": "ZZZ", "amount": 0, "reference": "far-too-long-reference"});
    let response = payment_handler()
        .call(Invocation::new(event(&body), json!({})))
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.header("access-control-allow-origin"), Some("*"));
    assert_eq!(
        message(&response),
        json!([
            {"currency": ["'ZZZ' is not a valid currency code."]},
            {"amount": ["'0' is less than minimum value '0.01'"]},
            {"reference": ["'far-too-long-reference' is longer than maximum length '12'"]}
        ])
    );
}

#[test]
fn corrupt_body_is_generic_failure() {
    let mut event = event(&json!({}));
    event["body"] = json!("{ 'currency': 'GBP' }");
    let response = payment_handler()
        .call(Invocation::new(event, json!({})))
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(message(&response), json!("Error extracting parameters"));
}

#[test]
fn handler_error_mapped_by_category() {
    let body = json!({"currency": "EUR", "amount": 5000});
    let response = payment_handler()
        .call(Invocation::new(event(&body), json!({})))
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(message(&response), json!("Payment not allowed"));
}

#[test]
fn validate_then_store_injection() {
    let store = Arc::new(
        InMemoryParameterStore::new()
            .with("/service/token", "secret")
            .with("/service/region", "eu-west-2"),
    );

    let handler = Decorated::builder(|inv: Invocation| -> HandlerResult {
        Ok(Response::json(json!({
            "token": inv.arg("token"),
            "region": inv.arg("/service/region"),
            "year": inv.arg("year"),
        })))
    })
    .with(HandleAllExceptions::new())
    .with(ExtractFromStore::new(
        store,
        vec![
            StoreParameter::new("/service/token").target("token"),
            StoreParameter::new("/service/region"),
        ],
    ))
    .with(ValidateDecorator::new(vec![ValidatedArgument::new("year")
        .validator(Mandatory::new())
        .validator(RegexValidator::new(r"\d{4}").unwrap())]))
    .build();

    let response = handler
        .call(Invocation::empty().with_arg("year", json!("2019")))
        .unwrap();
    assert_eq!(
        response.body().as_json(),
        Some(&json!({"token": "secret", "region": "eu-west-2", "year": "2019"}))
    );

    let response = handler.call(Invocation::empty()).unwrap();
    assert_eq!(message(&response), json!([{"year": ["Missing mandatory value"]}]));
}

#[test]
fn configured_cors_and_messages() {
    let config = ConfigLoader::new()
        .ignore_log_level_env()
        .with_string(
            r#"
                [cors]
                allow_origin = "https://shop.example"
                allow_methods = "GET,POST"

                [messages]
                extract_failure = "Invalid request"
            "#,
            "toml",
        )
        .unwrap()
        .load()
        .unwrap();

    let registry = Arc::new(DecoderRegistry::new());
    let requests = vec![ExtractionRequest::builder("/missing_source_key")
        .source("headers")
        .build(&registry)
        .unwrap()];

    let handler = Decorated::builder(|_: Invocation| -> HandlerResult { Ok(Response::ok()) })
        .with(CorsDecorator::from_config(&config.cors))
        .with(
            ExtractDecorator::new(registry, requests)
                .failure_message(config.messages.extract_failure.clone()),
        )
        .build();

    let response = handler.call(Invocation::new(json!({}), json!({}))).unwrap();
    assert_eq!(message(&response), json!("Invalid request"));
    assert_eq!(response.header("access-control-allow-methods"), Some("GET,POST"));
    assert_eq!(
        response.to_envelope()["headers"]["access-control-allow-origin"],
        json!("https://shop.example")
    );
}
