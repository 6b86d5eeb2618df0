//! Schema migration framework.

use crate::ProjectError;
use crate::schema::Project;

pub const LATEST_VERSION: u32 = 1;

pub fn migrate_to_latest(mut project: Project) -> Result<Project, ProjectError> {
    while project.version < LATEST_VERSION {
        project = migrate_one_version(project)?;
    }
    Ok(project)
}

fn migrate_one_version(project: Project) -> Result<Project, ProjectError> {
    match project.version {
        0 => migrate_v0_to_v1(project),
        v => Err(ProjectError::Migration {
            what: format!("No migration path from version {}", v),
        }),
    }
}

/// Version 0 files are structurally identical; only the tag changes.
fn migrate_v0_to_v1(mut project: Project) -> Result<Project, ProjectError> {
    project.version = 1;
    Ok(project)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{AirplaneDef, AnalysisDef, OperatingPointDef};

    fn empty(version: u32) -> Project {
        Project {
            version,
            name: "test".to_string(),
            airplane: AirplaneDef {
                xyz_ref: [0.0; 3],
                s_ref: None,
                c_ref: None,
                b_ref: None,
                wings: vec![],
            },
            operating_point: OperatingPointDef {
                velocity: 10.0,
                density: 1.225,
                alpha: 0.0,
                beta: 0.0,
                p: 0.0,
                q: 0.0,
                r: 0.0,
            },
            analysis: AnalysisDef::default(),
        }
    }

    #[test]
    fn migrate_latest_is_noop() {
        let project = empty(LATEST_VERSION);
        let migrated = migrate_to_latest(project.clone()).unwrap();
        assert_eq!(migrated, project);
    }

    #[test]
    fn migrate_v0_bumps_version() {
        let migrated = migrate_to_latest(empty(0)).unwrap();
        assert_eq!(migrated.version, LATEST_VERSION);
        assert_eq!(migrated.name, "test");
    }
}
