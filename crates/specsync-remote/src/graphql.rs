//! GraphQL-over-HTTP design store.
//!
//! Hasura-style queries, one POST per trait method. Auth is a bearer
//! token; transport retry lives below this layer if it lives anywhere.

use crate::{DesignStore, RemoteError};
use serde_json::{Value, json};
use specsync_model::{ExistingRecord, Frame, Revision, SpecPayload, User, WrittenRecord};
use std::time::Duration;

const QUERY_GET_FRAME: &str = "
query GetFrame($fileKey: String!, $frameLinkId: String!) {
  frames(
    where: {
      _and: [
        {file: {file_key: {_eq: $fileKey}}},
        {frame_link_id: {_eq: $frameLinkId}}
      ]
    },
    limit: 1
  ) {
    id
    frame_link_id
    file_id
    name
    status
  }
}
";

const QUERY_LIST_RECORDS: &str = "
query ListDesignItemsByNodeLinkIds($fileKey: String!, $frameLinkId: String!, $nodeLinkIds: [String!]!) {
  design_items(
    where: {
      _and: [
        {frame: {frame_link_id: {_eq: $frameLinkId}}},
        {frame: {file: {file_key: {_eq: $fileKey}}}},
        {node_link_id: {_in: $nodeLinkIds}}
      ]
    }
  ) {
    id
    no
    name
    type
    node_link_id
    section_link_id
    frame_id
    status
    specs
  }
}
";

const QUERY_FRAMES_BY_LINK_IDS: &str = "
query ListFramesByLinkIds($fileKey: String!, $linkIds: [String!]!) {
  frames(
    where: {
      _and: [
        {file: {file_key: {_eq: $fileKey}}},
        {frame_link_id: {_in: $linkIds}}
      ]
    }
  ) {
    frame_link_id
  }
}
";

const MUTATION_UPSERT_SPECS: &str = "
mutation UpsertDesignItemSpecs($items: [design_items_insert_input!]!) {
  insert_design_items(
    objects: $items,
    on_conflict: {
      constraint: design_items_section_link_id_node_link_id_file_id_key,
      update_columns: [specs, type, status, name, no]
    }
  ) {
    returning {
      id
      no
      name
      type
      node_link_id
      status
      specs
    }
  }
}
";

const MUTATION_INSERT_REVISIONS: &str = "
mutation InsertDesignItemRevs($revs: [design_items_revs_insert_input!]!) {
  insert_design_items_revs(objects: $revs) {
    affected_rows
  }
}
";

const QUERY_USER_BY_EMAIL: &str = "
query GetUserByEmail($email: String!) {
  users(where: {email: {_eq: $email}}, limit: 1) {
    id
    email
  }
}
";

/// Blocking GraphQL client for the design store.
pub struct GraphQlStore {
    endpoint: String,
    token: Option<String>,
    client: reqwest::blocking::Client,
}

impl GraphQlStore {
    pub fn new(endpoint: impl Into<String>, token: Option<String>) -> Result<GraphQlStore, RemoteError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| RemoteError::Transport(e.to_string()))?;
        Ok(GraphQlStore {
            endpoint: endpoint.into(),
            token,
            client,
        })
    }

    fn execute(&self, query: &str, variables: Value) -> Result<Value, RemoteError> {
        tracing::debug!(endpoint = %self.endpoint, "dispatching design-store request");
        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "query": query, "variables": variables }));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .map_err(|e| RemoteError::Transport(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Transport(format!(
                "{} returned HTTP {status}",
                self.endpoint
            )));
        }

        let body: Value = response
            .json()
            .map_err(|e| RemoteError::Decode(e.to_string()))?;

        if let Some(errors) = body.get("errors").and_then(Value::as_array)
            && !errors.is_empty()
        {
            let messages: Vec<&str> = errors
                .iter()
                .filter_map(|e| e.get("message").and_then(Value::as_str))
                .collect();
            return Err(RemoteError::Rejected(messages.join("; ")));
        }

        body.get("data")
            .cloned()
            .ok_or_else(|| RemoteError::Decode("response carries no data".to_string()))
    }

    fn decode<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, RemoteError> {
        serde_json::from_value(value).map_err(|e| RemoteError::Decode(e.to_string()))
    }
}

impl DesignStore for GraphQlStore {
    fn get_frame(&self, file_key: &str, frame_id: &str) -> Result<Option<Frame>, RemoteError> {
        let data = self.execute(
            QUERY_GET_FRAME,
            json!({ "fileKey": file_key, "frameLinkId": frame_id }),
        )?;
        let mut frames: Vec<Frame> = Self::decode(data["frames"].clone())?;
        Ok(if frames.is_empty() {
            None
        } else {
            Some(frames.remove(0))
        })
    }

    fn list_records(
        &self,
        file_key: &str,
        frame_id: &str,
        node_link_ids: &[String],
    ) -> Result<Vec<ExistingRecord>, RemoteError> {
        let data = self.execute(
            QUERY_LIST_RECORDS,
            json!({
                "fileKey": file_key,
                "frameLinkId": frame_id,
                "nodeLinkIds": node_link_ids,
            }),
        )?;
        Self::decode(data["design_items"].clone())
    }

    fn list_frames_by_link_ids(
        &self,
        file_key: &str,
        link_ids: &[String],
    ) -> Result<Vec<String>, RemoteError> {
        let data = self.execute(
            QUERY_FRAMES_BY_LINK_IDS,
            json!({ "fileKey": file_key, "linkIds": link_ids }),
        )?;
        let rows = data["frames"]
            .as_array()
            .ok_or_else(|| RemoteError::Decode("frames is not an array".to_string()))?;
        Ok(rows
            .iter()
            .filter_map(|row| row.get("frame_link_id").and_then(Value::as_str))
            .map(str::to_string)
            .collect())
    }

    fn upsert_specs(&self, payloads: &[SpecPayload]) -> Result<Vec<WrittenRecord>, RemoteError> {
        let items = serde_json::to_value(payloads).map_err(|e| RemoteError::Decode(e.to_string()))?;
        let data = self.execute(MUTATION_UPSERT_SPECS, json!({ "items": items }))?;
        Self::decode(data["insert_design_items"]["returning"].clone())
    }

    fn insert_revisions(&self, revisions: &[Revision]) -> Result<u64, RemoteError> {
        let revs = serde_json::to_value(revisions).map_err(|e| RemoteError::Decode(e.to_string()))?;
        let data = self.execute(MUTATION_INSERT_REVISIONS, json!({ "revs": revs }))?;
        data["insert_design_items_revs"]["affected_rows"]
            .as_u64()
            .ok_or_else(|| RemoteError::Decode("affected_rows missing".to_string()))
    }

    fn get_user_by_email(&self, email: &str) -> Result<Option<User>, RemoteError> {
        let data = self.execute(QUERY_USER_BY_EMAIL, json!({ "email": email }))?;
        let mut users: Vec<User> = Self::decode(data["users"].clone())?;
        Ok(if users.is_empty() {
            None
        } else {
            Some(users.remove(0))
        })
    }
}
