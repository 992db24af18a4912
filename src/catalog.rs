use crate::*;

/// Existence of a routine by unqualified name, across every schema.
pub const PROC_EXISTS: &str = "SELECT EXISTS(SELECT 1 FROM pg_proc WHERE proname = $1)";

/// Existence of a routine by name within one schema.
#[cfg(feature = "schema")]
pub const PROC_EXISTS_IN: &str = "SELECT EXISTS(SELECT 1 FROM pg_proc p JOIN pg_namespace n ON n.oid = p.pronamespace WHERE n.nspname = $1 AND p.proname = $2)";

/// Asks the catalog whether every name in `names` exists as a routine.
///
/// Names are checked one query at a time, in order, stopping at the first
/// miss, which is logged. An empty list proves nothing and reports `false`.
/// Overloads collapse into one answer and any schema on the server counts.
pub async fn probe<D, L>(db: &D, names: &[&str], logger: &L) -> Result<bool, ProbeError>
where
    D: Database + ?Sized,
    L: Logger + ?Sized,
{
    scan(db, PROC_EXISTS, &[], names, logger).await
}

/// Same as [`probe`], restricted to routines living in `schema`.
#[cfg(feature = "schema")]
pub async fn probe_in<D, L>(
    db: &D,
    schema: &str,
    names: &[&str],
    logger: &L,
) -> Result<bool, ProbeError>
where
    D: Database + ?Sized,
    L: Logger + ?Sized,
{
    scan(db, PROC_EXISTS_IN, &[schema], names, logger).await
}

async fn scan<D, L>(
    db: &D,
    sql: &str,
    scope: &[&str],
    names: &[&str],
    logger: &L,
) -> Result<bool, ProbeError>
where
    D: Database + ?Sized,
    L: Logger + ?Sized,
{
    let mut present = false;
    for name in names {
        let args = scope
            .iter()
            .chain(std::iter::once(name))
            .copied()
            .collect::<Vec<_>>();
        present = db
            .scalar(sql, &args)
            .await
            .map_err(|e| ProbeError {
                routine: name.to_string(),
                source: Box::new(e),
            })?;
        if !present {
            logger.info(&format!("Function {} does not exist", name));
            break;
        }
    }
    Ok(present)
}
