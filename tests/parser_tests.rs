use pretty_assertions::assert_eq;
use procedure_profile_studio::parser::{
    parse_procedure_details, parse_procedure_profile, parse_snapshot, ProcedureStat,
};
use procedure_profile_studio::rpc::client::extract_table;
use procedure_profile_studio::rpc::ApiResponse;
use procedure_profile_studio::utils::error::ParseError;

const PROFILE_RESPONSE: &str = r#"{
  "status": 1,
  "appstatus": -128,
  "statusstring": null,
  "appstatusstring": null,
  "results": [{
    "status": -128,
    "schema": [
      {"name": "TIMESTAMP", "type": 6},
      {"name": "PROCEDURE", "type": 9},
      {"name": "WEIGHTED_PERC", "type": 6},
      {"name": "INVOCATIONS", "type": 6},
      {"name": "AVG", "type": 6},
      {"name": "MIN", "type": 6},
      {"name": "MAX", "type": 6},
      {"name": "ABORTS", "type": 6},
      {"name": "FAILURES", "type": 6}
    ],
    "data": [
      [1700000000000, "voter.Vote", 80, 10, 200000000, 1000, 900000000, 0, 0],
      [1700000000000, "voter.Initialize", 20, 5, 100000000, 1000, 300000000, 0, 0]
    ]
  }]
}"#;

const DETAIL_RESPONSE: &str = r#"{
  "status": 1,
  "results": {
    "0": {
      "schema": [
        {"name": "TIMESTAMP", "type": 6},
        {"name": "HOST_ID", "type": 5},
        {"name": "PARTITION_ID", "type": 5},
        {"name": "PROCEDURE", "type": 9},
        {"name": "INVOCATIONS", "type": 6},
        {"name": "AVG_EXECUTION_TIME", "type": 6}
      ],
      "data": [
        [1700000000000, 0, 0, "voter.Vote", 6, 1000000],
        [1700000000000, 0, 1, "voter.Vote", 2, 3000000],
        [1700000000000, 0, 0, "voter.Results", 4, 250000]
      ]
    }
  }
}"#;

#[test]
fn test_profile_response_end_to_end() {
    let response: ApiResponse = serde_json::from_str(PROFILE_RESPONSE).unwrap();
    let table = extract_table(response, "PROCEDUREPROFILE").unwrap();
    let stats = parse_procedure_profile(&table).unwrap();

    assert_eq!(
        stats,
        vec![
            ProcedureStat::new("voter.Vote", 200_000_000.0, 10),
            ProcedureStat::new("voter.Initialize", 100_000_000.0, 5),
        ]
    );
}

#[test]
fn test_detail_response_merges_partitions() {
    let response: ApiResponse = serde_json::from_str(DETAIL_RESPONSE).unwrap();
    let table = extract_table(response, "PROCEDURE").unwrap();
    let details = parse_procedure_details(&table).unwrap();

    assert_eq!(details.len(), 2);
    assert_eq!(details[0].procedure_name, "voter.Vote");
    // (6 * 1ms + 2 * 3ms) / 8
    assert_eq!(details[0].avg_latency_ms, 1.5);
    assert_eq!(details[1].procedure_name, "voter.Results");
    assert_eq!(details[1].avg_latency_ms, 0.25);
}

#[test]
fn test_empty_profile_table() {
    let response: ApiResponse = serde_json::from_str(
        r#"{"status":1,"results":[{"schema":[{"name":"PROCEDURE"},{"name":"AVG"},{"name":"INVOCATIONS"}],"data":[]}]}"#,
    )
    .unwrap();
    let table = extract_table(response, "PROCEDUREPROFILE").unwrap();
    assert!(parse_procedure_profile(&table).unwrap().is_empty());
}

#[test]
fn test_short_row_is_invalid() {
    let response: ApiResponse = serde_json::from_str(
        r#"{"status":1,"results":[{"schema":[{"name":"PROCEDURE"},{"name":"AVG"},{"name":"INVOCATIONS"}],"data":[["Vote", 10]]}]}"#,
    )
    .unwrap();
    let table = extract_table(response, "PROCEDUREPROFILE").unwrap();
    assert!(matches!(
        parse_procedure_profile(&table),
        Err(ParseError::InvalidFormat(_))
    ));
}

#[test]
fn test_snapshot_in_dashboard_layout() {
    let data = parse_snapshot(
        r#"{
          "PROCEDURE_PROFILE": [
            {"PROCEDURE": "P1", "AVG": 200000000, "INVOCATIONS": 10},
            {"PROCEDURE": "P2", "AVG": 100000000, "INVOCATIONS": 5}
          ],
          "PROCEDURE_DETAILS": [
            {"PROCEDURE": "P1", "AVG_LATENCY": 2.5}
          ]
        }"#,
    )
    .unwrap();

    assert_eq!(data.profile.len(), 2);
    assert_eq!(data.profile[1], ProcedureStat::new("P2", 100_000_000.0, 5));
    assert_eq!(data.details[0].avg_latency_ms, 2.5);
}

#[test]
fn test_snapshot_rejects_negative_invocations() {
    let result = parse_snapshot(
        r#"{"PROCEDURE_PROFILE":[{"PROCEDURE":"P1","AVG":1,"INVOCATIONS":-1}]}"#,
    );
    assert!(matches!(result, Err(ParseError::JsonError(_))));
}
