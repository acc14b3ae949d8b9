mod support;

use formrun_api::{TransportError, parse_envelope};
use formrun_handler::{bind_page, find_form, submission::SUBMITTING_LABEL};
use formrun_types::{ResponseEnvelope, SubmitOutcome, UiState};
use support::{FakeTransport, RecordedRequest, SINGLE_PAGE, element, page, text, with_page};

#[tokio::test]
async fn blank_name_posts_default_and_renders_success() {
    let document = page(SINGLE_PAGE);
    let transport = FakeTransport::new().reply(200, ResponseEnvelope::success("Hello, World!"));
    let bindings = bind_page(&document, transport.clone());
    assert_eq!(bindings.len(), 1);

    let form = find_form(&document, "workflowForm").expect("form");
    let dispatch = bindings.submit(form).await;

    assert!(dispatch.event.default_prevented());
    assert_eq!(
        transport.requests(),
        vec![RecordedRequest {
            path: "/api/run-test".into(),
            body: r#"{"name":"World"}"#.into(),
        }]
    );

    let result = element(&document, "result");
    assert_eq!(result.class_name(), "result success");
    assert_eq!(result.display.as_deref(), Some("block"));
    assert_eq!(text(&document, "result"), "✅ Success! Hello, World!");

    let button = element(&document, "submitBtn");
    assert!(!button.disabled);
    assert_eq!(button.text, "Run Workflow");
    assert!(!element(&document, "loading").has_class("show"));
    assert_eq!(bindings.handlers()[0].ui_state(), UiState::DisplayingSuccess);
}

#[tokio::test]
async fn name_is_read_at_submit_time_and_trimmed() {
    let document = page(SINGLE_PAGE);
    let transport = FakeTransport::new().reply(200, ResponseEnvelope::success("Hello, Ada!"));
    let bindings = bind_page(&document, transport.clone());

    with_page(&document, |page| page.set_value_by_id("name", "  Ada  "));
    let form = find_form(&document, "workflowForm").expect("form");
    bindings.submit(form).await;

    assert_eq!(transport.requests()[0].body, r#"{"name":"Ada"}"#);
}

#[tokio::test]
async fn result_markup_is_shown_as_text() {
    let document = page(SINGLE_PAGE);
    let transport = FakeTransport::new().reply(200, ResponseEnvelope::success("<b>done</b>"));
    let bindings = bind_page(&document, transport);

    let form = find_form(&document, "workflowForm").expect("form");
    bindings.submit(form).await;

    let result = element(&document, "result");
    assert!(!result.inner_html.contains("<b>"));
    assert!(result.inner_html.contains("&lt;b&gt;done&lt;/b&gt;"));
    assert_eq!(text(&document, "result"), "✅ Success! <b>done</b>");
}

#[tokio::test]
async fn server_error_message_is_rendered() {
    let document = page(SINGLE_PAGE);
    let transport = FakeTransport::new().reply(500, ResponseEnvelope::failure("timeout"));
    let bindings = bind_page(&document, transport);

    let form = find_form(&document, "workflowForm").expect("form");
    let dispatch = bindings.submit(form).await;

    assert_eq!(
        dispatch.last_outcome(),
        Some(&SubmitOutcome::ServerError {
            status: 500,
            message: "timeout".into()
        })
    );
    assert_eq!(element(&document, "result").class_name(), "result error");
    assert_eq!(text(&document, "result"), "❌ Error: timeout");
    assert_eq!(bindings.handlers()[0].ui_state(), UiState::DisplayingError);
}

#[tokio::test]
async fn server_error_without_message_uses_fallback() {
    let document = page(SINGLE_PAGE);
    let transport = FakeTransport::new().reply(404, ResponseEnvelope::default());
    let bindings = bind_page(&document, transport);

    let form = find_form(&document, "workflowForm").expect("form");
    bindings.submit(form).await;

    assert_eq!(text(&document, "result"), "❌ Error: Unknown error");
}

#[tokio::test]
async fn null_error_body_takes_the_server_error_branch() {
    let document = page(SINGLE_PAGE);
    let envelope = parse_envelope("null").expect("json body");
    let transport = FakeTransport::new().reply(500, envelope);
    let bindings = bind_page(&document, transport);

    let form = find_form(&document, "workflowForm").expect("form");
    let dispatch = bindings.submit(form).await;

    assert_eq!(
        dispatch.last_outcome(),
        Some(&SubmitOutcome::ServerError {
            status: 500,
            message: "Unknown error".into()
        })
    );
    assert_eq!(text(&document, "result"), "❌ Error: Unknown error");
}

#[tokio::test]
async fn network_failure_renders_its_message_and_restores_controls() {
    let document = page(SINGLE_PAGE);
    let transport = FakeTransport::new().fail(TransportError::Network("connection refused".into()));
    let bindings = bind_page(&document, transport);

    let form = find_form(&document, "workflowForm").expect("form");
    bindings.submit(form).await;

    assert_eq!(element(&document, "result").class_name(), "result error");
    assert_eq!(text(&document, "result"), "❌ Error: connection refused");
    assert!(!element(&document, "submitBtn").disabled);
    assert!(!element(&document, "loading").has_class("show"));
}

#[tokio::test]
async fn controls_show_activity_while_request_is_pending() {
    let document = page(SINGLE_PAGE);
    let transport = FakeTransport::new().reply(200, ResponseEnvelope::success("first"));
    let bindings = bind_page(&document, transport.clone());
    let form = find_form(&document, "workflowForm").expect("form");
    bindings.submit(form).await;

    let release = transport.gated_reply(200, ResponseEnvelope::success("second"));
    let transport_ref = &transport;
    let document_ref = &document;
    let handler = bindings.handlers()[0].clone();
    let observe = async move {
        while transport_ref.requests().len() < 2 {
            tokio::task::yield_now().await;
        }
        let button = element(document_ref, "submitBtn");
        assert!(button.disabled);
        assert_eq!(button.text, SUBMITTING_LABEL);
        assert!(element(document_ref, "loading").has_class("show"));

        let result = element(document_ref, "result");
        assert_eq!(result.class_name(), "result");
        assert!(result.inner_html.is_empty());
        assert!(result.is_hidden());
        assert_eq!(handler.ui_state(), UiState::Submitting);

        release.send(()).expect("release reply");
    };

    let (dispatch, ()) = tokio::join!(bindings.submit(form), observe);
    assert!(dispatch.last_outcome().is_some_and(SubmitOutcome::is_success));
    assert_eq!(text(&document, "result"), "✅ Success! second");
    assert_eq!(element(&document, "submitBtn").text, "Run Workflow");
}

#[tokio::test]
async fn missing_loading_indicator_is_tolerated() {
    let document = page(
        r#"
elements:
  - tag: form
    id: workflowForm
    children:
      - { tag: input, id: name, name: name, value: Grace }
      - { tag: button, id: submitBtn, text: Go }
  - { tag: div, id: result }
"#,
    );
    let transport = FakeTransport::new().reply(200, ResponseEnvelope::success("Hello, Grace!"));
    let bindings = bind_page(&document, transport);

    let form = find_form(&document, "workflowForm").expect("form");
    bindings.submit(form).await;

    assert_eq!(text(&document, "result"), "✅ Success! Hello, Grace!");
}

#[tokio::test]
async fn missing_result_container_leaves_form_unbound() {
    let document = page(
        r#"
elements:
  - tag: form
    id: workflowForm
    children:
      - { tag: input, id: name, name: name }
      - { tag: button, id: submitBtn, text: Go }
"#,
    );
    let transport = FakeTransport::new();
    let bindings = bind_page(&document, transport.clone());
    assert!(bindings.is_empty());

    let form = find_form(&document, "workflowForm").expect("form");
    let dispatch = bindings.submit(form).await;
    assert!(!dispatch.event.default_prevented());
    assert!(dispatch.outcomes.is_empty());
    assert!(transport.requests().is_empty());
}
