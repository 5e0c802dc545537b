//! Cross-crate pipeline tests: scan, merge, render, hosts update.

use ghettonet_core::{
    Entry, MergeOptions, ParseOptions, merge, parse_entries, render_document,
};
use pretty_assertions::assert_eq;

/// Two sources claim the same name; the dated one wins, the result
/// renders, and the rendered document reconciles to itself.
#[test]
fn multi_source_reconciliation_round_trips() {
    let from_email = "Hi! Add these to your hosts file:\n\
                      \n\
                      ### BEGIN GHETTONET\n\
                      # mirror list, december\n\
                      ## DATE 2010-12-04\n\
                      213.251.145.96 wikileaks.org www.wikileaks.org\n\
                      ### END GHETTONET\n\
                      \n\
                      cheers";
    let from_web = "<html><body><pre>\n\
                    ### BEGIN GHETTONET\n\
                    <b>88.80.13.160</b> wikileaks.org\n\
                    ### END GHETTONET\n\
                    </pre></body></html>";

    let mut entries = parse_entries(from_email, ParseOptions::default()).unwrap();
    entries.extend(parse_entries(from_web, ParseOptions::default()).unwrap());
    assert_eq!(entries.len(), 2);

    // dated entry outranks the undated web scrape
    let merged = merge(entries, MergeOptions::strict()).unwrap();
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].address, "213.251.145.96");
    let mut names = merged[0].names.clone();
    names.sort();
    assert_eq!(
        names,
        vec!["wikileaks.org".to_string(), "www.wikileaks.org".to_string()]
    );

    let rendered = render_document(&merged);
    let reparsed = parse_entries(&rendered, ParseOptions::strict()).unwrap();
    let remerged = merge(reparsed, MergeOptions::strict()).unwrap();
    assert_eq!(remerged.len(), 1);
    assert_eq!(remerged[0].address, merged[0].address);
    assert_eq!(remerged[0].date, merged[0].date);
}

/// Lenient conflict narration survives a second pass without growing.
#[test]
fn conflict_narration_is_stable_across_passes() {
    let sources = vec![
        Entry::new("1.2.3.4", vec!["x.example".to_string()]),
        Entry::new("5.6.7.8", vec!["x.example".to_string()]),
    ];
    let merged = merge(sources, MergeOptions::default()).unwrap();
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].address, "1.2.3.4");
    assert_eq!(merged[0].comments, vec!["## CONFLICT: 5.6.7.8".to_string()]);

    let rendered = render_document(&merged);
    let reparsed = parse_entries(&rendered, ParseOptions::strict()).unwrap();
    let remerged = merge(reparsed, MergeOptions::strict()).unwrap();
    assert_eq!(remerged[0].comments, vec!["## CONFLICT: 5.6.7.8".to_string()]);
}

/// A full hosts-file update cycle: parse the old file, merge in news,
/// rewrite, and check the rewritten file still parses strictly.
#[test]
fn hosts_update_cycle() {
    let dir = tempfile::tempdir().unwrap();
    let hosts = dir.path().join("hosts");
    std::fs::write(
        &hosts,
        "127.0.0.1 localhost\n\
         ::1 ip6-localhost\n\
         \n\
         ### BEGIN GHETTONET\n\
         ## DATE 2009-01-01\n\
         1.2.3.4 x.example\n\
         ### END GHETTONET\n",
    )
    .unwrap();

    let news = "### BEGIN GHETTONET\n\
                ## DATE 2010-01-01\n\
                5.6.7.8 x.example\n\
                ### END GHETTONET\n";

    let existing = ghettonet_hosts::read(&hosts).unwrap();
    let mut entries = parse_entries(&existing, ParseOptions::strict()).unwrap();
    entries.extend(parse_entries(news, ParseOptions::default()).unwrap());
    let merged = merge(entries, MergeOptions::strict()).unwrap();
    ghettonet_hosts::update(&hosts, &merged).unwrap();

    let rewritten = std::fs::read_to_string(&hosts).unwrap();
    assert!(rewritten.starts_with("127.0.0.1 localhost\n"));
    assert!(rewritten.contains("::1 ip6-localhost"));
    assert!(rewritten.contains("5.6.7.8    x.example"));
    assert!(!rewritten.contains("1.2.3.4"));

    let final_entries = parse_entries(&rewritten, ParseOptions::strict()).unwrap();
    assert_eq!(final_entries.len(), 1);
    assert_eq!(final_entries[0].address, "5.6.7.8");
    assert_eq!(
        final_entries[0].date.as_ref().unwrap().timestamp.date(),
        chrono::NaiveDate::from_ymd_opt(2010, 1, 1).unwrap()
    );
}
