//! Warehouse message payloads describing sequencing runs.
//!
//! When an ONT run is created or changes state, one message per sample
//! request on each flowcell is sent to the external warehouse. The field
//! names follow the warehouse's flowcell schema; fields the pipeline
//! does not populate are still present as nulls.

use chrono::{DateTime, Utc};
use serde::Serialize;

use benchline_core::types::DbId;
use benchline_db::models::ont_run::FlowcellMessageRow;

/// Static identity fields stamped on every outbound message.
#[derive(Debug, Clone)]
pub struct MessageConfig {
    /// The LIMS name the warehouse attributes the data to.
    pub lims: String,
    /// Name of the GridION instrument.
    pub instrument_name: String,
    /// Study UUID the sequencing belongs to.
    pub study_uuid: String,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            lims: "benchline".to_string(),
            instrument_name: "GXB02004".to_string(),
            study_uuid: String::new(),
        }
    }
}

/// One warehouse message: envelope plus the flowcell body.
#[derive(Debug, Clone, Serialize)]
pub struct FlowcellMessage {
    pub lims: String,
    pub ont_flowcell: FlowcellBody,
}

/// The flowcell body of a warehouse message.
#[derive(Debug, Clone, Serialize)]
pub struct FlowcellBody {
    pub last_updated: DateTime<Utc>,
    pub id_flowcell_lims: DbId,
    pub sample_uuid: String,
    pub study_uuid: String,
    pub experiment_name: DbId,
    pub instrument_name: String,
    pub instrument_slot: i32,
    pub pipeline_id_lims: Option<String>,
    pub requested_data_type: Option<String>,
    pub tag_identifier: Option<String>,
    pub tag_sequence: Option<String>,
    pub tag_set_id_lims: Option<DbId>,
    pub tag_set_name: Option<String>,
    pub tag2_identifier: Option<String>,
    pub tag2_sequence: Option<String>,
    pub tag2_set_id_lims: Option<DbId>,
    pub tag2_set_name: Option<String>,
}

/// Build the warehouse messages for a run from its flat join rows.
///
/// `last_updated` is stamped on every message so one run update shows a
/// single timestamp downstream.
pub fn build_flowcell_messages(
    rows: &[FlowcellMessageRow],
    config: &MessageConfig,
    last_updated: DateTime<Utc>,
) -> Vec<FlowcellMessage> {
    rows.iter()
        .map(|row| FlowcellMessage {
            lims: config.lims.clone(),
            ont_flowcell: FlowcellBody {
                last_updated,
                id_flowcell_lims: row.flowcell_id,
                sample_uuid: row.sample_external_id.clone(),
                study_uuid: config.study_uuid.clone(),
                experiment_name: row.run_id,
                instrument_name: config.instrument_name.clone(),
                instrument_slot: row.position,
                pipeline_id_lims: None,
                requested_data_type: None,
                tag_identifier: row.tag_group_id.clone(),
                tag_sequence: row.tag_oligo.clone(),
                tag_set_id_lims: row.tag_set_id,
                tag_set_name: row.tag_set_name.clone(),
                tag2_identifier: None,
                tag2_sequence: None,
                tag2_set_id_lims: None,
                tag2_set_name: None,
            },
        })
        .collect()
}
