use lca_http::{CalcLine, CalcRequest, LcaClient};

fn live_base_url() -> Option<String> {
    std::env::var("LCA_API_BASE")
        .ok()
        .filter(|value| !value.trim().is_empty())
}

#[tokio::test]
async fn live_warm_up_catalogue_and_calculation() {
    let base = match live_base_url() {
        Some(base) => base,
        None => {
            eprintln!("skipping live test: LCA_API_BASE is not set");
            return;
        }
    };

    let client = LcaClient::new(base);

    // Kick a dormant deployment awake before the real calls.
    client.warm_up().await;

    let epds = client.list_epds().await.expect("EPD catalogue must load");
    assert!(!epds.is_empty(), "deployment must ship at least one EPD");

    let first = &epds[0];
    let request = CalcRequest::new([CalcLine::new(
        first.id.clone(),
        1.0,
        first.declared_unit.clone(),
    )]);

    let result = client
        .calculate(&request)
        .await
        .expect("calculation must succeed");
    assert_eq!(result.lines.len(), 1);
    assert_eq!(result.lines[0].material_name, first.name);
}
