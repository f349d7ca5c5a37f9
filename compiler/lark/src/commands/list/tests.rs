use lark_eval::ErrorCategory;
use lark_stdlib::HostConfig;
use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_single_module_listing() {
    let host = HostConfig::new().build();
    let listing = render_listing(&host, Some("std/string")).unwrap();
    assert_eq!(listing, "std/string\n  concatenate(values)\n  empty: string\n");
}

#[test]
fn test_random_listing_shows_parameters() {
    let host = HostConfig::new().random_seed(1).build();
    let listing = render_listing(&host, Some("random")).unwrap();
    assert_eq!(
        listing,
        "random\n  get()\n  get_float()\n  get_limited(minimum, maximum)\n"
    );
}

#[test]
fn test_full_listing_covers_every_module() {
    let host = HostConfig::new().build();
    let listing = render_listing(&host, None).unwrap();
    let headers: Vec<&str> = listing.lines().filter(|l| !l.starts_with(' ')).collect();
    assert_eq!(
        headers,
        vec![
            "file",
            "folder",
            "path",
            "random",
            "std/character_list",
            "std/float",
            "std/integer",
            "std/string",
        ]
    );
    assert!(listing.contains("  write(contents, filepath, mode)\n"));
    assert!(listing.contains("  invalid_path_characters: character_list\n"));
}

#[test]
fn test_unknown_module() {
    let host = HostConfig::new().build();
    let err = render_listing(&host, Some("sockets")).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::NameError);
}
