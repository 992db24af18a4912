/// One installable unit: a named script and the routines it must leave
/// behind in `pg_proc`.
///
/// Groups are compile-time constants. The payloads are bound with
/// [`include_str!`] so a built binary carries every script it installs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Group {
    /// Stable group name, used in log lines, errors and advisory lock keys.
    pub name: &'static str,
    /// SQL text executed verbatim as one multi-statement submission.
    pub payload: &'static str,
    /// Routine names the payload creates, as recorded in `pg_proc.proname`.
    pub expected: &'static [&'static str],
}

/// Job queue routines.
pub const JOB_SQL: &str = include_str!("sql/job.sql");
/// Worker registry routines.
pub const WORKER_SQL: &str = include_str!("sql/worker.sql");
/// Master election routines.
pub const MASTER_SQL: &str = include_str!("sql/master.sql");
/// Change notification trigger routine.
pub const NOTIFY_SQL: &str = include_str!("sql/notify.sql");

#[rustfmt::skip]
pub const JOB_FUNCTIONS: &[&str] = &[
    "init_job",
    "insert_job",
    "update_job_initial",
    "update_job_final",
    "update_job_final_encrypted",
    "update_stale_jobs",
    "delete_job",
    "select_job",
    "select_all_jobs",
    "select_all_jobs_by_worker_rid",
    "select_all_jobs_by_search",
    "add_retention_archive",
    "remove_retention_archive",
    "delete_stale_jobs",
    "select_job_from_archive",
    "select_all_jobs_from_archive",
    "select_all_jobs_from_archive_by_search",
];
#[rustfmt::skip]
pub const WORKER_FUNCTIONS: &[&str] = &[
    "init_worker",
    "insert_worker",
    "update_worker",
    "delete_worker",
    "delete_stale_workers",
    "select_worker",
    "select_all_workers",
    "select_all_workers_by_search",
    "select_all_connections",
];
#[rustfmt::skip]
pub const MASTER_FUNCTIONS: &[&str] = &[
    "init_master",
    "update_master",
    "select_master",
];
#[rustfmt::skip]
pub const NOTIFY_FUNCTIONS: &[&str] = &[
    "notify_event",
];

pub const JOB: Group = Group {
    name: "job",
    payload: JOB_SQL,
    expected: JOB_FUNCTIONS,
};
pub const WORKER: Group = Group {
    name: "worker",
    payload: WORKER_SQL,
    expected: WORKER_FUNCTIONS,
};
pub const MASTER: Group = Group {
    name: "master",
    payload: MASTER_SQL,
    expected: MASTER_FUNCTIONS,
};
pub const NOTIFY: Group = Group {
    name: "notify",
    payload: NOTIFY_SQL,
    expected: NOTIFY_FUNCTIONS,
};

impl Group {
    /// Every group, in the order a fresh database should receive them.
    pub const ALL: [&'static Group; 4] = [&JOB, &WORKER, &MASTER, &NOTIFY];

    /// Looks a group up by its stable name.
    pub fn find(name: &str) -> Option<&'static Group> {
        Self::ALL.iter().copied().find(|g| g.name == name)
    }
}

impl std::fmt::Display for Group {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn expected_lists_are_nonempty_and_unique() {
        for group in Group::ALL {
            assert!(!group.expected.is_empty(), "{} has no routines", group);
            let unique = group.expected.iter().collect::<HashSet<_>>();
            assert_eq!(unique.len(), group.expected.len(), "{} repeats a name", group);
        }
    }

    #[test]
    fn expected_names_are_lowercase_identifiers() {
        for name in Group::ALL.iter().flat_map(|g| g.expected.iter()) {
            assert!(
                name.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'),
                "{} is not a folded identifier",
                name
            );
        }
    }

    #[test]
    fn payloads_define_every_expected_routine() {
        for group in Group::ALL {
            for name in group.expected {
                let definition = format!("CREATE OR REPLACE FUNCTION {}(", name);
                assert!(
                    group.payload.contains(&definition),
                    "{} payload never defines {}",
                    group,
                    name
                );
            }
        }
    }

    #[test]
    fn find_by_name() {
        assert_eq!(Group::find("job"), Some(&JOB));
        assert_eq!(Group::find("worker"), Some(&WORKER));
        assert_eq!(Group::find("master"), Some(&MASTER));
        assert_eq!(Group::find("notify"), Some(&NOTIFY));
        assert_eq!(Group::find("JOB"), None);
        assert_eq!(Group::find("queue"), None);
    }

    #[test]
    fn install_order() {
        let names = Group::ALL.iter().map(|g| g.name).collect::<Vec<_>>();
        assert_eq!(names, ["job", "worker", "master", "notify"]);
    }
}
