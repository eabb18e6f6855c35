//! Property tests for artifact and remote path handling.

use proptest::prelude::*;

use batchship::domain::entities::ArtifactRef;
use batchship::domain::value_objects::RemotePath;

fn segment() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9_-][A-Za-z0-9._-]{0,15}")
        .unwrap()
        .prop_filter("not a dot segment", |s| s != "." && s != "..")
}

fn relative_path() -> impl Strategy<Value = String> {
    proptest::collection::vec(segment(), 1..=4).prop_map(|segments| segments.join("/"))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Parsing an artifact path never panics on arbitrary input.
    #[test]
    fn property_artifact_parse_never_panics(s in "(?s).{0,256}") {
        let _ = ArtifactRef::parse(&s);
    }

    /// PROPERTY: Any path containing a `..` segment is rejected.
    #[test]
    fn property_parent_segments_are_rejected(
        before in relative_path(),
        after in relative_path(),
    ) {
        let raw = format!("{}/../{}", before, after);
        prop_assert!(ArtifactRef::parse(&raw).is_err());
    }

    /// PROPERTY: Absolute paths are rejected.
    #[test]
    fn property_absolute_paths_are_rejected(path in relative_path()) {
        let raw = format!("/{}", path);
        prop_assert!(ArtifactRef::parse(&raw).is_err());
    }

    /// PROPERTY: Clean relative paths parse unchanged and land under the remote base.
    #[test]
    fn property_artifact_lands_under_remote_base(path in relative_path()) {
        let artifact = ArtifactRef::parse(&path).unwrap();
        prop_assert_eq!(artifact.as_str(), path.as_str());

        let base = RemotePath::new("/opt/test_project");
        let remote = artifact.remote_path(&base);
        let expected_prefix = format!("{}/", base.as_str());
        prop_assert!(remote.as_str().starts_with(&expected_prefix));
        prop_assert_eq!(remote.file_name(), path.rsplit('/').next().unwrap());
    }

    /// PROPERTY: `./` prefixes and trailing slashes do not change the artifact.
    #[test]
    fn property_redundant_components_normalize(path in relative_path()) {
        let noisy = format!("./{}/", path);
        let artifact = ArtifactRef::parse(&noisy).unwrap();
        prop_assert_eq!(artifact.as_str(), path.as_str());
    }
}
