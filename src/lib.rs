// Metapackage for the cross-crate integration tests in tests/.
// The member crates are pulled in as regular dependencies; nothing is
// exported from here.
