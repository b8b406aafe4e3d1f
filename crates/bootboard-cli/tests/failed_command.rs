use bootboard_testing::assertions::assert_panel_outcomes;
use bootboard_testing::fixtures::failed_records;
use bootboard_testing::{StubServer, TestWorld};

#[test]
fn test_failed_panels_render_each_outcome() {
    let server = StubServer::start()
        .unwrap()
        .with_dataset("/_ajax/defconf", failed_records(8))
        .with_dataset("/_ajax/job", Vec::new())
        .with_dataset("/_ajax/boot", failed_records(20));
    let world = TestWorld::new()
        .with_api_url(server.url())
        .with_format("json");

    let result = world.run(&["failed"]).unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());

    let json = result.json().unwrap();
    assert_panel_outcomes(&json, &["rows", "empty", "rows"]).unwrap();
    assert_eq!(json["panels"][0]["rows"].as_array().unwrap().len(), 5);
    assert_eq!(json["panels"][2]["rows"].as_array().unwrap().len(), 15);
    assert_eq!(json["panels"][1]["message"], "No failed jobs.");

    assert_eq!(server.requests().len(), 3);
    let builds = &server.requests_to("/_ajax/defconf")[0];
    assert_eq!(
        builds,
        "/_ajax/defconf?sort=created_on&sort_order=-1&date_range=15&limit=5&skip=0&status=FAIL\
         &field=job&field=kernel&field=metadata&field=created_on"
    );
}

#[test]
fn test_failed_plain_output() {
    let server = StubServer::start()
        .unwrap()
        .with_dataset("/_ajax/defconf", failed_records(2))
        .with_dataset("/_ajax/job", Vec::new())
        .with_status("/_ajax/boot", 500);
    let world = TestWorld::new().with_api_url(server.url());

    let result = world.run(&["failed"]).unwrap();
    assert_eq!(result.code(), Some(2));
    assert_eq!(
        result.stdout(),
        "Error while loading boot reports from the server.\n\
         Please contact the website administrators. Error code was: 500\n\
         \n\
         Failed Builds\n\
         TREE – BRANCH      KERNEL   DATE\n\
         mainline – master  v4.9-0   2017-03-22\n\
         next – master      v4.10-1  2017-03-22\n\
         \n\
         Failed Jobs\n  \
         No failed jobs.\n\
         \n\
         Failed Boot Reports\n  \
         Error loading data.\n"
    );
}

#[test]
fn test_failed_banner_copy_per_resource() {
    let server = StubServer::start()
        .unwrap()
        .with_status("/_ajax/defconf", 404)
        .with_status("/_ajax/job", 500)
        .with_status("/_ajax/boot", 502);
    let world = TestWorld::new()
        .with_api_url(server.url())
        .with_format("json");

    let result = world.run(&["failed"]).unwrap();
    assert_eq!(result.code(), Some(2));

    let json = result.json().unwrap();
    assert_panel_outcomes(&json, &["error", "error", "error"]).unwrap();
    assert_eq!(json["panels"][0]["banner"]["id"], "defconfs-404-error");
    assert_eq!(
        json["panels"][1]["banner"]["message"],
        "500 error while loading jobs from the server.\nPlease contact the website administrators."
    );
    // Only 404 and 500 raise a banner.
    assert!(json["panels"][2]["banner"].is_null());
}
