//! Shared test utilities for integration and E2E tests.
//!
//! This module provides common descriptor fixtures and helpers to reduce
//! duplication across test files.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_minimal_tiapp();
//!     // ... test code
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::descriptors;
    pub use super::TestFixture;
}

/// Environment variables the install tools read; cleared for every command so
/// the host environment cannot leak into a test.
pub const HOOK_VARS: &[&str] = &[
    "npm_package_name",
    "npm_package_version",
    "npm_package_titanium_platform",
    "npm_package_titanium_platform_0",
    "npm_package_titanium_platform_1",
    "npm_package_titanium_platform_2",
    "TIAPP_FILE",
    "RUST_LOG",
];

/// Common tiapp.xml snippets for testing.
#[allow(dead_code)]
pub mod descriptors {
    /// Descriptor with scalar fields only.
    pub const MINIMAL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ti:app xmlns:ti="http://ti.appcelerator.org">
    <id>com.example.app</id>
    <name>Example</name>
    <version>1.0.0</version>
    <sdk-version>12.2.0.GA</sdk-version>
</ti:app>
"#;

    /// Descriptor with every section the accessors know about, plus platform
    /// specific content they don't.
    pub const FULL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ti:app xmlns:ti="http://ti.appcelerator.org">
    <id>com.example.app</id>
    <name>Example</name>
    <version>1.0.0</version>
    <deployment-targets>
        <target device="android">true</target>
        <target device="iphone">false</target>
    </deployment-targets>
    <property name="ti.ui.defaultunit" type="string">dp</property>
    <property name="retries" type="int">3</property>
    <android xmlns:android="http://schemas.android.com/apk/res/android">
        <manifest android:versionCode="7"/>
    </android>
    <modules>
        <module platform="android" version="5.0.0">ti.map</module>
        <module>ti.cloud</module>
    </modules>
    <plugins>
        <plugin version="1.0">ti.alloy</plugin>
    </plugins>
</ti:app>
"#;

    /// Malformed XML for error testing.
    pub const MALFORMED: &str = "<ti:app xmlns:ti=\"http://ti.appcelerator.org\"><id>oops</ti:app>";
}

/// A test fixture that provides a temporary app directory.
///
/// # Example
///
/// ```rust,ignore
/// let fixture = TestFixture::new().with_tiapp(descriptors::FULL);
///
/// fixture
///     .command()
///     .arg("modules")
///     .assert()
///     .success();
/// ```
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add a `tiapp.xml` with the given content.
    pub fn with_tiapp(self, content: &str) -> Self {
        self.temp_dir
            .child("tiapp.xml")
            .write_str(content)
            .expect("Failed to write tiapp.xml");
        self
    }

    /// Add the minimal descriptor.
    #[allow(dead_code)]
    pub fn with_minimal_tiapp(self) -> Self {
        self.with_tiapp(descriptors::MINIMAL)
    }

    /// Create a directory below the app root and return its path.
    #[allow(dead_code)]
    pub fn subdir(&self, path: &str) -> PathBuf {
        let child = self.temp_dir.child(path);
        child.create_dir_all().expect("Failed to create directory");
        child.path().to_path_buf()
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Get the path to the descriptor.
    pub fn tiapp_path(&self) -> PathBuf {
        self.temp_dir.path().join("tiapp.xml")
    }

    /// Current descriptor content.
    #[allow(dead_code)]
    pub fn tiapp_content(&self) -> String {
        std::fs::read_to_string(self.tiapp_path()).expect("Failed to read tiapp.xml")
    }

    /// Load the descriptor through the library.
    #[allow(dead_code)]
    pub fn document(&self) -> tiapp_xml::ConfigDocument {
        tiapp_xml::ConfigDocument::load(self.tiapp_path()).expect("Failed to load tiapp.xml")
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl TestFixture {
    /// A `tiapp` command running in this fixture's directory with the hook
    /// environment cleared.
    #[allow(dead_code)]
    pub fn command(&self) -> assert_cmd::Command {
        self.command_in(self.path())
    }

    /// A `tiapp` command running in `dir`.
    #[allow(dead_code)]
    pub fn command_in(&self, dir: &Path) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("tiapp");
        cmd.current_dir(dir);
        for var in HOOK_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    /// A `tiapp-install-module` command running in `dir`.
    #[allow(dead_code)]
    pub fn install_command_in(&self, dir: &Path) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("tiapp-install-module");
        cmd.current_dir(dir);
        for var in HOOK_VARS {
            cmd.env_remove(var);
        }
        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_creates_temp_dir() {
        let fixture = TestFixture::new();
        assert!(fixture.path().exists());
    }

    #[test]
    fn test_fixture_with_tiapp() {
        let fixture = TestFixture::new().with_minimal_tiapp();
        assert!(fixture.tiapp_path().exists());
    }

    #[test]
    fn test_descriptors_parse() {
        for content in [descriptors::MINIMAL, descriptors::FULL] {
            tiapp_xml::ConfigDocument::parse(content).expect("descriptor should parse");
        }
        assert!(tiapp_xml::ConfigDocument::parse(descriptors::MALFORMED).is_err());
    }
}
