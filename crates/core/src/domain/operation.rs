// Operation Domain Model

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::DomainError;

/// Benchmark action passed to smallfile as `operation`
///
/// `Cleanup` is synthetic: it is never requested by the workflow, the
/// adapter issues it after a run to remove the files the run produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operation {
    Create,
    Delete,
    Append,
    Overwrite,
    Read,
    Readdir,
    #[serde(rename = "ls-l")]
    LsL,
    Chmod,
    Stat,
    Getxattr,
    Setxattr,
    Symlink,
    Mkdir,
    Rmdir,
    Rename,
    DeleteRenamed,
    Truncate,
    SwiftGet,
    SwiftPut,
    Cleanup,
}

impl Operation {
    pub const ALL: [Operation; 20] = [
        Operation::Create,
        Operation::Delete,
        Operation::Append,
        Operation::Overwrite,
        Operation::Read,
        Operation::Readdir,
        Operation::LsL,
        Operation::Chmod,
        Operation::Stat,
        Operation::Getxattr,
        Operation::Setxattr,
        Operation::Symlink,
        Operation::Mkdir,
        Operation::Rmdir,
        Operation::Rename,
        Operation::DeleteRenamed,
        Operation::Truncate,
        Operation::SwiftGet,
        Operation::SwiftPut,
        Operation::Cleanup,
    ];

    /// Name as understood by smallfile_cli.py
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Delete => "delete",
            Operation::Append => "append",
            Operation::Overwrite => "overwrite",
            Operation::Read => "read",
            Operation::Readdir => "readdir",
            Operation::LsL => "ls-l",
            Operation::Chmod => "chmod",
            Operation::Stat => "stat",
            Operation::Getxattr => "getxattr",
            Operation::Setxattr => "setxattr",
            Operation::Symlink => "symlink",
            Operation::Mkdir => "mkdir",
            Operation::Rmdir => "rmdir",
            Operation::Rename => "rename",
            Operation::DeleteRenamed => "delete-renamed",
            Operation::Truncate => "truncate",
            Operation::SwiftGet => "swift-get",
            Operation::SwiftPut => "swift-put",
            Operation::Cleanup => "cleanup",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .iter()
            .find(|op| op.as_str() == s)
            .copied()
            .ok_or_else(|| DomainError::UnknownOperation(s.to_string()))
    }
}
