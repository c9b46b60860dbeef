//! Integration tests for the editor crate: load, edit, save

use pagecraft_editor::{
    ActiveEdit, ComponentDescriptor, ContentSource, Document, DocumentModel, Edit, EditorError,
    Endpoint, GatewayError, MemoryGateway, PageIdentifier, SectionDescriptor, SessionLoad,
};

fn sample_page() -> Document {
    let mut doc = Document::with_components(vec![
        ComponentDescriptor::hero_header("Summer Sale", "20% off", "Shop", "/beach.jpg"),
        ComponentDescriptor::button("/shop", "Shop now"),
    ]);
    doc.sections = vec![SectionDescriptor::with_id("A"), SectionDescriptor::with_id("B")];
    doc.css = ".button { color: white; }".to_string();
    doc
}

fn identifier() -> PageIdentifier {
    PageIdentifier::new("summer-sale").with_legacy("1042")
}

async fn load(gateway: &MemoryGateway) -> DocumentModel {
    match DocumentModel::load(gateway, &identifier()).await.unwrap() {
        SessionLoad::Ready(model) => model,
        SessionLoad::AuthPending => panic!("Expected a loaded session"),
    }
}

#[tokio::test]
async fn test_document_lifecycle() {
    let gateway = MemoryGateway::new();
    gateway.insert(Endpoint::Stable, "summer-sale", sample_page());

    let mut model = load(&gateway).await;
    assert_eq!(model.history().len(), 1);
    assert_eq!(*model.document(), sample_page());

    model
        .apply(Edit::UpdateComponent {
            index: 1,
            component: ComponentDescriptor::button("/shop", "Buy"),
        })
        .unwrap();

    let receipt = model.save(&gateway, &identifier(), None).await.unwrap();

    assert_eq!(receipt.endpoint, Endpoint::Stable);
    assert_eq!(receipt.version, 1);
    assert_eq!(model.last_saved_version(), Some(1));
    assert!(!model.is_dirty());

    let stored = gateway.page(Endpoint::Stable, "summer-sale").unwrap();
    assert_eq!(stored.components, model.document().components);
    assert!(stored.html.contains(">Buy</a>"));
    assert_eq!(stored.css, sample_page().css);
}

#[tokio::test]
async fn test_load_falls_back_to_legacy_identifier() {
    let gateway = MemoryGateway::new();
    gateway.insert(Endpoint::Legacy, "1042", sample_page());

    let model = load(&gateway).await;
    assert_eq!(model.document().sections.len(), 2);
}

#[tokio::test]
async fn test_load_failure_on_both_identifiers() {
    let gateway = MemoryGateway::new();
    gateway.fail(Endpoint::Stable, GatewayError::Transport("connection refused".into()));
    gateway.fail(Endpoint::Legacy, GatewayError::Decode("not json".into()));

    let result = DocumentModel::load(&gateway, &identifier()).await;

    match result {
        Err(EditorError::LoadFailure { stable, legacy, .. }) => {
            assert_eq!(stable, GatewayError::Transport("connection refused".into()));
            assert_eq!(legacy, Some(GatewayError::Decode("not json".into())));
        }
        other => panic!("Expected load failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_auth_pending_defers_load_until_retry() {
    let gateway = MemoryGateway::new();
    gateway.insert(Endpoint::Stable, "summer-sale", sample_page());
    gateway.set_auth_pending(true);

    let first = DocumentModel::load(&gateway, &identifier()).await.unwrap();
    assert!(matches!(first, SessionLoad::AuthPending));

    gateway.set_auth_pending(false);
    let model = load(&gateway).await;
    assert_eq!(*model.document(), sample_page());
}

#[tokio::test]
async fn test_failed_save_leaves_state_untouched() {
    let gateway = MemoryGateway::new();
    gateway.insert(Endpoint::Stable, "summer-sale", sample_page());
    let mut model = load(&gateway).await;

    model.apply(Edit::SetCss { css: "body {}".into() }).unwrap();
    let before = model.document().clone();
    let history_len = model.history().len();
    let version = model.version();

    gateway.fail(Endpoint::Stable, GatewayError::Status { code: 503, body: "busy".into() });
    gateway.fail(Endpoint::Legacy, GatewayError::Status { code: 503, body: "busy".into() });

    let error = model.save(&gateway, &identifier(), None).await.unwrap_err();

    assert!(error.is_recoverable());
    assert_eq!(*model.document(), before);
    assert_eq!(model.history().len(), history_len);
    assert_eq!(model.version(), version);
    assert!(model.can_undo());
    assert!(model.is_dirty());
    assert!(model.last_saved_version().is_none());

    // Retrying after recovery sends the same full document
    gateway.recover(Endpoint::Stable);
    let receipt = model.save(&gateway, &identifier(), None).await.unwrap();
    assert_eq!(receipt.version, version);
}

#[tokio::test]
async fn test_editing_continues_while_save_in_flight() {
    let gateway = MemoryGateway::new();
    gateway.insert(Endpoint::Stable, "summer-sale", sample_page());
    let mut model = load(&gateway).await;

    model.apply(Edit::SetCss { css: "v1".into() }).unwrap();
    let job = model.prepare_save(None);

    // User keeps editing before the save completes
    model.apply(Edit::SetCss { css: "v2".into() }).unwrap();

    let receipt = job.run(&gateway, &identifier()).await.unwrap();
    assert!(model.acknowledge_save(&receipt));

    assert_eq!(receipt.version, 1);
    assert_eq!(model.version(), 2);
    assert_eq!(model.last_saved_version(), Some(1));
    assert!(model.is_dirty());
    assert_eq!(gateway.page(Endpoint::Stable, "summer-sale").unwrap().css, "v1");
}

#[tokio::test]
async fn test_late_receipt_from_superseded_session_is_ignored() {
    let gateway = MemoryGateway::new();
    gateway.insert(Endpoint::Stable, "summer-sale", sample_page());

    let old_session = load(&gateway).await;
    let job = old_session.prepare_save(None);
    drop(old_session);

    let mut new_session = load(&gateway).await;
    let receipt = job.run(&gateway, &identifier()).await.unwrap();

    assert!(!new_session.acknowledge_save(&receipt));
    assert!(new_session.last_saved_version().is_none());
}

#[tokio::test]
async fn test_out_of_order_receipts_keep_newest() {
    let gateway = MemoryGateway::new();
    gateway.insert(Endpoint::Stable, "summer-sale", sample_page());
    let mut model = load(&gateway).await;

    model.apply(Edit::SetCss { css: "v1".into() }).unwrap();
    let older = model.prepare_save(None);
    model.apply(Edit::SetCss { css: "v2".into() }).unwrap();
    let newer = model.prepare_save(None);

    let newer_receipt = newer.run(&gateway, &identifier()).await.unwrap();
    let older_receipt = older.run(&gateway, &identifier()).await.unwrap();

    assert!(model.acknowledge_save(&newer_receipt));
    assert!(!model.acknowledge_save(&older_receipt));
    assert_eq!(model.last_saved_version(), Some(2));
    assert!(!model.is_dirty());
}

#[tokio::test]
async fn test_save_with_active_html_edit() {
    let gateway = MemoryGateway::new();
    gateway.insert(Endpoint::Stable, "summer-sale", sample_page());
    let mut model = load(&gateway).await;

    let active = ActiveEdit::new().html("<h1>Hand made</h1>");
    model.save(&gateway, &identifier(), Some(&active)).await.unwrap();

    let stored = gateway.page(Endpoint::Stable, "summer-sale").unwrap();
    assert_eq!(stored.html, "<h1>Hand made</h1>");
    assert_eq!(stored.source, ContentSource::Markup);
    assert_eq!(stored.components, sample_page().components);

    // The store holds the active markup, the committed document does not
    assert!(model.is_dirty());

    model.apply(Edit::SetHtml { html: "<h1>Hand made</h1>".into() }).unwrap();
    assert_eq!(*model.document(), stored);
    assert!(!model.is_dirty());
}

#[test]
fn test_edit_serialization() {
    let edit = Edit::AddFeatureItem {
        section: 1,
        item: serde_json::json!({ "label": "Free returns" }),
    };

    let json = serde_json::to_string(&edit).unwrap();
    let deserialized: Edit = serde_json::from_str(&json).unwrap();

    assert_eq!(edit, deserialized);
}
