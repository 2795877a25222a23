//! Fixtures shared by the toolchain tests.

use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;
use tar::Builder;

use super::paths::toolchain_binary;

/// A driver stub that answers `--version` like the real toolchain.
pub const FAKE_SWIFT: &[u8] =
    b"#!/bin/sh\necho \"SwiftWasm Swift version 5.3 (swiftlang-5.3.1)\"\n";

/// Marks `path` as executable.
pub fn make_executable(path: &Path) {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
            .expect("Should set permissions");
    }
    #[cfg(not(unix))]
    let _ = path;
}

/// Installs a fake toolchain for `version` under `root`, returning the
/// driver path.
pub fn install_fake_toolchain(root: &Path, version: &str) -> PathBuf {
    let binary = toolchain_binary(root, version);
    std::fs::create_dir_all(binary.parent().expect("binary has a parent"))
        .expect("Should create toolchain dir");
    std::fs::write(&binary, FAKE_SWIFT).expect("Should write binary");
    make_executable(&binary);
    binary
}

/// Builds a `.tar.gz` toolchain archive with every entry under `root_name/`.
pub fn toolchain_archive(root_name: &str) -> Vec<u8> {
    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = Builder::new(encoder);

    for dir in ["", "/usr", "/usr/bin", "/usr/lib"] {
        let mut header = tar::Header::new_gnu();
        header.set_entry_type(tar::EntryType::Directory);
        header.set_size(0);
        header.set_mode(0o755);
        header.set_cksum();
        builder
            .append_data(&mut header, format!("{root_name}{dir}"), std::io::empty())
            .expect("Should append directory");
    }

    let mut header = tar::Header::new_gnu();
    header.set_size(FAKE_SWIFT.len() as u64);
    header.set_mode(0o755);
    header.set_cksum();
    builder
        .append_data(&mut header, format!("{root_name}/usr/bin/swift"), FAKE_SWIFT)
        .expect("Should append file");

    let library = b"library content";
    let mut header = tar::Header::new_gnu();
    header.set_size(library.len() as u64);
    header.set_mode(0o644);
    header.set_cksum();
    builder
        .append_data(
            &mut header,
            format!("{root_name}/usr/lib/libswiftCore.a"),
            library.as_slice(),
        )
        .expect("Should append file");

    builder
        .into_inner()
        .expect("Should finish tar")
        .finish()
        .expect("Should finish gzip")
}

/// Builds an archive that unpacks without a `usr/bin/swift` driver.
pub fn archive_without_driver(root_name: &str) -> Vec<u8> {
    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = Builder::new(encoder);

    let readme = b"not a toolchain";
    let mut header = tar::Header::new_gnu();
    header.set_size(readme.len() as u64);
    header.set_mode(0o644);
    header.set_cksum();
    builder
        .append_data(&mut header, format!("{root_name}/README"), readme.as_slice())
        .expect("Should append file");

    builder
        .into_inner()
        .expect("Should finish tar")
        .finish()
        .expect("Should finish gzip")
}
