use bootboard_testing::assertions::{assert_row_count, assert_table_state, assert_table_total};
use bootboard_testing::fixtures::{boot_id, boot_records};
use bootboard_testing::{StubServer, TestWorld};

const BOOTS: &str = "/_ajax/boot";

fn server_with(count: usize) -> StubServer {
    StubServer::start()
        .expect("stub server")
        .with_dataset(BOOTS, boot_records(count))
}

#[test]
fn test_boots_loads_every_page() {
    let server = server_with(230);
    let world = TestWorld::new()
        .with_api_url(server.url())
        .with_format("json");

    let result = world.run(&["boots", "--limit", "100"]).unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());

    let json = result.json().unwrap();
    assert_table_total(&json, 230).unwrap();
    assert_row_count(&json, 25).unwrap();
    assert_table_state(&json, "ready").unwrap();
    assert_eq!(json["report"]["state"], "complete");
    assert_eq!(json["report"]["requested"], serde_json::json!([100, 200]));
    assert_eq!(json["table"]["rows"][0]["id"]["$oid"], boot_id(0));

    let requests = server.requests_to(BOOTS);
    assert_eq!(requests.len(), 3);
    assert!(
        requests.contains(
            &"/_ajax/boot?sort=created_on&sort_order=-1&date_range=max&limit=100&skip=0"
                .to_string()
        ),
        "requests: {:?}",
        requests
    );
}

#[test]
fn test_boots_table_controls() {
    let server = server_with(230);
    let world = TestWorld::new()
        .with_api_url(server.url())
        .with_format("json");

    let result = world
        .run(&["boots", "--limit", "100", "--page-len", "100", "--page", "3", "--asc"])
        .unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());

    let json = result.json().unwrap();
    assert_row_count(&json, 30).unwrap();
    assert_eq!(json["table"]["page"], 2);
    // Ascending by date puts the oldest record first.
    assert_eq!(json["table"]["rows"][0]["id"]["$oid"], boot_id(229));
}

#[test]
fn test_boots_search_filters_rows() {
    let server = server_with(230);
    let world = TestWorld::new().with_api_url(server.url());

    let result = world.run(&["boots", "--search", "PANDA"]).unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());
    assert!(
        result
            .stdout()
            .contains("Showing 1 to 25 of 58 entries (filtered from 230 total entries)"),
        "stdout: {}",
        result.stdout()
    );
}

#[test]
fn test_boots_plain_output() {
    let server = server_with(3);
    let world = TestWorld::new().with_api_url(server.url());

    let result = world.run(&["boots"]).unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());

    let stdout = result.stdout();
    assert!(stdout.contains("TREE – BRANCH"));
    assert!(stdout.contains("mainline – master"));
    assert!(stdout.contains("FAIL"));
    let info = stdout
        .lines()
        .find(|line| line.starts_with("Showing"))
        .unwrap();
    insta::assert_snapshot!(info, @"Showing 1 to 3 of 3 entries  (page 1 of 1)");
}

#[test]
fn test_boots_html_output() {
    let server = server_with(3);
    let world = TestWorld::new()
        .with_api_url(server.url())
        .with_format("html");

    let result = world.run(&["boots"]).unwrap();
    assert!(result.success());
    assert!(
        result
            .stdout()
            .contains("<table class=\"table table-hover table-striped\">")
    );
    assert!(result.stdout().contains("sorting_desc"));
    assert!(
        result
            .stdout()
            .contains("<div class=\"dataTables_info\">Showing 1 to 3 of 3 entries</div>")
    );
}

#[test]
fn test_empty_result_is_not_an_error() {
    let server = server_with(0);
    let world = TestWorld::new().with_api_url(server.url());

    let result = world.run(&["boots"]).unwrap();
    assert_eq!(result.code(), Some(0));
    assert!(result.stdout().contains("No boots data available."));
    assert!(!result.stderr().contains("ERROR"));
}

#[test]
fn test_not_found_renders_banner_and_exits_2() {
    let server = StubServer::start().unwrap().with_status(BOOTS, 404);
    let world = TestWorld::new().with_api_url(server.url());

    let result = world.run(&["boots"]).unwrap();
    assert_eq!(result.code(), Some(2));
    assert!(result.stdout().contains("Error loading data."));
    assert!(result.stdout().contains("Error code was: 404"));
    assert_eq!(server.requests_to(BOOTS).len(), 1);
}

#[test]
fn test_not_found_json_carries_banner() {
    let server = StubServer::start().unwrap().with_status(BOOTS, 404);
    let world = TestWorld::new()
        .with_api_url(server.url())
        .with_format("json");

    let result = world.run(&["boots"]).unwrap();
    assert_eq!(result.code(), Some(2));

    let json = result.json().unwrap();
    assert_table_state(&json, "error").unwrap();
    assert_eq!(json["report"]["state"], "error");
    assert_eq!(json["banner"]["id"], "boots-404-error");
}

#[test]
fn test_unreachable_api_has_no_banner() {
    let world = TestWorld::new()
        .with_api_url("http://127.0.0.1:1")
        .with_format("json");

    let result = world.run(&["boots"]).unwrap();
    assert_eq!(result.code(), Some(2));

    let json = result.json().unwrap();
    assert_table_state(&json, "error").unwrap();
    assert!(json.get("banner").is_none());
}

#[test]
fn test_secondary_failure_is_reported_as_warning() {
    let server = server_with(230).fail_page(BOOTS, 100, 500);
    let world = TestWorld::new()
        .with_api_url(server.url())
        .with_format("json");

    let result = world
        .run(&["boots", "--limit", "100", "--completion", "settled"])
        .unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());

    let json = result.json().unwrap();
    assert_table_total(&json, 130).unwrap();
    assert_eq!(json["report"]["warnings"][0]["skip"], 100);
    assert_eq!(json["report"]["warnings"][0]["status"], 500);
}

#[test]
fn test_unorderable_sort_column_is_rejected() {
    let server = server_with(3);
    let world = TestWorld::new().with_api_url(server.url());

    let result = world.run(&["boots", "--sort-column", "9"]).unwrap();
    assert_eq!(result.code(), Some(1));
    assert!(result.stderr().contains("Error: Column 9 is not orderable"));
}

#[test]
fn test_invalid_config_is_a_setup_error() {
    let world = TestWorld::new().with_config("max_query_limit = 0\n");

    let result = world.run(&["boots"]).unwrap();
    assert_eq!(result.code(), Some(1));
    assert!(result.stderr().starts_with("Error: "));
}

#[test]
fn test_api_url_flag_overrides_environment() {
    let server = server_with(3);
    let world = TestWorld::new().with_api_url("http://127.0.0.1:1");

    let result = world.run(&["--api-url", &server.url(), "boots"]).unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());
    assert_eq!(server.requests_to(BOOTS).len(), 1);
}
