use crate::*;

/// Installs groups of routines and verifies them against `pg_proc`.
///
/// Holds nothing but the logger; every bit of state lives in the database.
/// The steps of one call run strictly in order: optional probe, execution,
/// verifying probe. Concurrent callers are not serialized unless they go
/// through [`Installer::install_locked`].
#[derive(Debug, Default, Clone)]
pub struct Installer<L = Facade> {
    logger: L,
}

impl<L: Logger> Installer<L> {
    pub fn new(logger: L) -> Self {
        Self { logger }
    }

    pub fn logger(&self) -> &L {
        &self.logger
    }

    /// Whether every name exists as a routine. See [`catalog::probe`].
    pub async fn probe<D>(&self, db: &D, names: &[&str]) -> Result<bool, ProbeError>
    where
        D: Database + ?Sized,
    {
        catalog::probe(db, names, &self.logger).await
    }

    /// Ensures every expected routine of `group` exists once this returns `Ok`.
    ///
    /// Without `force`, a catalog that already has them all short-circuits
    /// the call. Otherwise the payload runs as one submission and the
    /// catalog is checked again; anything still missing is an
    /// [`InstallError::Incomplete`], even though the payload may have
    /// committed part of its work.
    pub async fn install<D>(&self, db: &D, group: &Group, force: bool) -> Result<(), InstallError>
    where
        D: Database + ?Sized,
    {
        if !force
            && self
                .probe(db, group.expected)
                .await
                .map_err(|e| InstallError::database(group.name, Phase::Checking, e))?
        {
            return Ok(());
        }
        db.execute(group.payload)
            .await
            .map_err(|e| InstallError::database(group.name, Phase::Executing, e))?;
        if !self
            .probe(db, group.expected)
            .await
            .map_err(|e| InstallError::database(group.name, Phase::Verifying, e))?
        {
            self.logger
                .warn(&format!("not all SQL {} functions were created", group.name));
            return Err(InstallError::Incomplete { group: group.name });
        }
        self.logger
            .info(&format!("SQL {} functions loaded successfully", group.name));
        Ok(())
    }

    /// Installs the group registered under `name`.
    pub async fn install_named<D>(&self, db: &D, name: &str, force: bool) -> Result<(), InstallError>
    where
        D: Database + ?Sized,
    {
        match Group::find(name) {
            Some(group) => self.install(db, group, force).await,
            None => Err(InstallError::UnknownGroup(name.to_string())),
        }
    }

    /// Installs every group in [`Group::ALL`] order, stopping at the first failure.
    pub async fn install_all<D>(&self, db: &D, force: bool) -> Result<(), InstallError>
    where
        D: Database + ?Sized,
    {
        for group in Group::ALL {
            self.install(db, group, force).await?;
        }
        Ok(())
    }

    /// [`Installer::install`] under a session advisory lock keyed by group name.
    ///
    /// The lock is released whether or not the install succeeds; an install
    /// error takes precedence over a failure to unlock.
    pub async fn install_locked<D>(&self, db: &D, group: &Group, force: bool) -> Result<(), InstallError>
    where
        D: Database + ?Sized,
    {
        db.lock(group.name)
            .await
            .map_err(|e| InstallError::database(group.name, Phase::Locking, e))?;
        let installed = self.install(db, group, force).await;
        let unlocked = db
            .unlock(group.name)
            .await
            .map_err(|e| InstallError::database(group.name, Phase::Unlocking, e));
        installed.and(unlocked)
    }
}
