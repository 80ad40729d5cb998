// src/installer/operation.rs

//! Changes the installer applies to the environment

use crate::package::PackageRecord;
use crate::project::is_unsafe_package;
use crate::repository::Repository;
use std::fmt;

/// A single change to the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Install(PackageRecord),
    Update { from: PackageRecord, to: PackageRecord },
    Uninstall(PackageRecord),
}

impl Operation {
    /// Package the operation leaves installed (or removes)
    pub fn package(&self) -> &PackageRecord {
        match self {
            Self::Install(p) | Self::Uninstall(p) => p,
            Self::Update { to, .. } => to,
        }
    }

    /// Describe the operation as a planned (not yet performed) change
    pub fn describe_planned(&self) -> String {
        match self {
            Self::Install(p) => format!("Would install {}", p),
            Self::Update { from, to } => format!(
                "Would update {} ({} -> {})",
                to.pretty_name(),
                from.version(),
                to.version()
            ),
            Self::Uninstall(p) => format!("Would remove {}", p),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Install(p) => write!(f, "Installing {}", p),
            Self::Update { from, to } => write!(
                f,
                "Updating {} ({} -> {})",
                to.pretty_name(),
                from.version(),
                to.version()
            ),
            Self::Uninstall(p) => write!(f, "Removing {}", p),
        }
    }
}

/// Counts of each kind of operation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OperationSummary {
    pub installs: usize,
    pub updates: usize,
    pub removals: usize,
}

impl OperationSummary {
    pub fn of(operations: &[Operation]) -> Self {
        let mut summary = Self::default();
        for op in operations {
            match op {
                Operation::Install(_) => summary.installs += 1,
                Operation::Update { .. } => summary.updates += 1,
                Operation::Uninstall(_) => summary.removals += 1,
            }
        }
        summary
    }
}

impl fmt::Display for OperationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural =
            |n: usize, one: &'static str, many: &'static str| if n == 1 { one } else { many };
        write!(
            f,
            "{} {}, {} {}, {} {}",
            self.installs,
            plural(self.installs, "install", "installs"),
            self.updates,
            plural(self.updates, "update", "updates"),
            self.removals,
            plural(self.removals, "removal", "removals"),
        )
    }
}

/// Diff the resolved package set against what is installed
///
/// Removals are only planned when `remove_untracked` is set, and never for
/// unsafe bootstrap packages or the root itself.
pub fn plan_operations(
    resolved: &[PackageRecord],
    installed: &Repository,
    root_name: &str,
    remove_untracked: bool,
) -> Vec<Operation> {
    let mut operations = Vec::new();

    for package in resolved {
        match installed.package(package.name()) {
            None => operations.push(Operation::Install(package.clone())),
            Some(current) if current.version() != package.version() => {
                operations.push(Operation::Update {
                    from: current.clone(),
                    to: package.clone(),
                });
            }
            Some(_) => {}
        }
    }

    if remove_untracked {
        for package in installed.packages() {
            let tracked = resolved.iter().any(|p| p.name() == package.name());
            if !tracked && package.name() != root_name && !is_unsafe_package(package.name()) {
                operations.push(Operation::Uninstall(package.clone()));
            }
        }
    }

    operations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::Version;

    fn pkg(name: &str, version: &str) -> PackageRecord {
        PackageRecord::new(name, Version::parse(version).unwrap())
    }

    fn installed() -> Repository {
        let mut repo = Repository::new("installed");
        repo.add_package(pkg("a", "1.2"));
        repo.add_package(pkg("cleo", "1.0"));
        repo.add_package(pkg("orphan", "0.1"));
        repo
    }

    #[test]
    fn test_plan_install_and_update() {
        let resolved = vec![pkg("a", "1.2"), pkg("cleo", "1.1"), pkg("b", "2.0")];
        let ops = plan_operations(&resolved, &installed(), "poetry", false);

        assert_eq!(
            ops,
            vec![
                Operation::Update {
                    from: pkg("cleo", "1.0"),
                    to: pkg("cleo", "1.1"),
                },
                Operation::Install(pkg("b", "2.0")),
            ]
        );
        assert_eq!(ops[0].to_string(), "Updating cleo (1.0 -> 1.1)");
        assert_eq!(ops[1].describe_planned(), "Would install b (2.0)");
    }

    #[test]
    fn test_no_removals_without_flag() {
        let ops = plan_operations(&[pkg("a", "1.2")], &installed(), "poetry", false);
        assert!(ops.iter().all(|op| !matches!(op, Operation::Uninstall(_))));
    }

    #[test]
    fn test_removals_with_flag() {
        let resolved = [pkg("a", "1.2"), pkg("cleo", "1.0")];
        let ops = plan_operations(&resolved, &installed(), "poetry", true);
        assert_eq!(ops, vec![Operation::Uninstall(pkg("orphan", "0.1"))]);
    }

    #[test]
    fn test_summary() {
        let ops = vec![
            Operation::Install(pkg("b", "1.0")),
            Operation::Install(pkg("c", "1.0")),
            Operation::Update {
                from: pkg("a", "1.0"),
                to: pkg("a", "1.1"),
            },
        ];
        let summary = OperationSummary::of(&ops);
        assert_eq!(summary.to_string(), "2 installs, 1 update, 0 removals");
    }
}
