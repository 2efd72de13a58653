use tracing::{info, warn};
use uuid::Uuid;

use crate::api::{ApiClient, ServiceChanges};
use crate::error::ClientError;
use crate::notice::Notice;
use crate::state::{reduce, Action, Snapshot};

/// Something a person asked for.
#[derive(Clone, Debug, PartialEq)]
pub enum Intent {
    CreateTariff { name: String },
    RenameTariff { id: Uuid, name: String },
    DeleteTariff { id: Uuid },
    CreateType { name: String },
    RenameType { id: Uuid, name: String },
    DeleteType { id: Uuid },
    AddService { tariff_id: Uuid, type_id: Uuid, value: f64, unit: String },
    UpdateService { id: Uuid, changes: ServiceChanges },
    DeleteService { id: Uuid },
    MoveService { id: Uuid, target_tariff_id: Uuid },
    Select(Option<Uuid>),
}

/// Holds the current snapshot. Every change goes through `dispatch`.
pub struct Session {
    api: ApiClient,
    snapshot: Snapshot,
}

impl Session {
    pub fn new(api: ApiClient) -> Self {
        Self { api, snapshot: Snapshot::default() }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Fetch both collections and replace the snapshot's data.
    pub async fn refresh(&mut self) -> Result<&Snapshot, ClientError> {
        self.reload().await?;
        Ok(&self.snapshot)
    }

    async fn reload(&mut self) -> Result<(), ClientError> {
        let tariffs = self.api.list_tariffs().await?;
        let types = self.api.list_service_types().await?;
        self.snapshot = reduce(&self.snapshot, Action::Loaded { tariffs, types });
        Ok(())
    }

    /// Apply an intent: run the mutation, record the outcome as a notice,
    /// then reload everything from the server.
    pub async fn dispatch(&mut self, intent: Intent) -> &Snapshot {
        if let Intent::Select(id) = intent {
            self.snapshot = reduce(&self.snapshot, Action::Select(id));
            return &self.snapshot;
        }

        let notice = match self.apply(intent).await {
            Ok(text) => Notice::ok(text),
            Err(e) => {
                warn!(error = %e, "mutation rejected");
                Notice::from_error(&e)
            }
        };
        self.snapshot = reduce(&self.snapshot, Action::Notify(notice));

        if let Err(e) = self.reload().await {
            warn!(error = %e, "reload failed");
            self.snapshot = reduce(&self.snapshot, Action::Notify(Notice::from_error(&e)));
        }
        &self.snapshot
    }

    async fn apply(&self, intent: Intent) -> Result<&'static str, ClientError> {
        let api = &self.api;
        let text = match intent {
            Intent::CreateTariff { name } => {
                let t = api.create_tariff(&name).await?;
                info!(tariff_id = %t.id, "tariff created");
                "Tariff created"
            }
            Intent::RenameTariff { id, name } => {
                api.rename_tariff(id, &name).await?;
                "Tariff renamed"
            }
            Intent::DeleteTariff { id } => {
                api.delete_tariff(id).await?;
                "Tariff deleted"
            }
            Intent::CreateType { name } => {
                api.create_service_type(&name).await?;
                "Service type created"
            }
            Intent::RenameType { id, name } => {
                api.rename_service_type(id, &name).await?;
                "Service type renamed"
            }
            Intent::DeleteType { id } => {
                api.delete_service_type(id).await?;
                "Service type deleted"
            }
            Intent::AddService { tariff_id, type_id, value, unit } => {
                api.add_service(tariff_id, type_id, value, &unit).await?;
                "Service added"
            }
            Intent::UpdateService { id, changes } => {
                api.update_service(id, &changes).await?;
                "Service updated"
            }
            Intent::DeleteService { id } => {
                api.delete_service(id).await?;
                "Service deleted"
            }
            Intent::MoveService { id, target_tariff_id } => {
                api.move_service(id, target_tariff_id).await?;
                "Service moved"
            }
            Intent::Select(_) => "",
        };
        Ok(text)
    }
}
