//! Durable session state: the four adjudication sets serialized as a
//! one-entry deflate ZIP archive wrapping `iqr_state.json`.
//!
//! The shape is a compatibility contract shared with other implementations
//! of this engine: a JSON object with exactly the four array fields `pos`,
//! `neg`, `external_pos`, `external_neg`, each element a
//! `[uuid, type_tag, vector]` triple. Working set, ranker, and scores are
//! derivable and deliberately not persisted.

use std::collections::HashSet;
use std::io::{Cursor, Read, Write};

use serde::{Deserialize, Serialize};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use iqr_core::constants::STATE_ARCHIVE_ENTRY;
use iqr_core::{Descriptor, IDescriptorFactory, SessionError, SessionResult};

use crate::session::IqrSession;

/// `(uuid, type_tag, vector)` as it appears on the wire.
type Triple = (String, String, Vec<f64>);

/// The JSON document inside the archive. Field order is part of the
/// format.
#[derive(Debug, Serialize, Deserialize)]
struct StateDoc {
    pos: Vec<Triple>,
    neg: Vec<Triple>,
    external_pos: Vec<Triple>,
    external_neg: Vec<Triple>,
}

fn to_triples(set: &HashSet<Descriptor>) -> Vec<Triple> {
    set.iter()
        .map(|d| {
            (
                d.uuid.clone(),
                d.type_tag.clone(),
                d.vector().map(<[f64]>::to_vec).unwrap_or_default(),
            )
        })
        .collect()
}

fn invalid(reason: impl std::fmt::Display) -> SessionError {
    SessionError::InvalidStateArchive {
        reason: reason.to_string(),
    }
}

fn write_failed(reason: impl std::fmt::Display) -> SessionError {
    SessionError::StateArchiveWrite {
        reason: reason.to_string(),
    }
}

fn encode(doc: &StateDoc) -> SessionResult<Vec<u8>> {
    let json = serde_json::to_vec(doc).map_err(|e| write_failed(e))?;

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    writer
        .start_file(STATE_ARCHIVE_ENTRY, options)
        .map_err(|e| write_failed(e))?;
    writer.write_all(&json).map_err(|e| write_failed(e))?;
    let cursor = writer.finish().map_err(|e| write_failed(e))?;
    Ok(cursor.into_inner())
}

fn decode(bytes: &[u8]) -> SessionResult<StateDoc> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(|e| invalid(e))?;
    if archive.len() != 1 {
        return Err(invalid(format!(
            "expected exactly one entry, found {}",
            archive.len()
        )));
    }
    let mut entry = archive
        .by_name(STATE_ARCHIVE_ENTRY)
        .map_err(|_| invalid(format!("missing expected entry {STATE_ARCHIVE_ENTRY}")))?;
    let mut json = String::new();
    entry.read_to_string(&mut json).map_err(|e| invalid(e))?;
    serde_json::from_str(&json).map_err(|e| invalid(e))
}

fn restore_set(
    triples: &[Triple],
    factory: &dyn IDescriptorFactory,
    target: &mut HashSet<Descriptor>,
) -> SessionResult<()> {
    for (uuid, type_tag, vector) in triples {
        let mut d = factory.build(type_tag, uuid)?;
        if d.has_vector() {
            // A storage-backed factory may hand back an already-populated
            // descriptor; the archived vector must agree exactly.
            if d.vector() != Some(vector.as_slice()) {
                return Err(SessionError::VectorMismatch { uuid: uuid.clone() });
            }
        } else if !vector.is_empty() {
            // An empty stored vector marks a descriptor exported without
            // one; leave it unset so the round trip is lossless.
            d.set_vector(vector.clone());
        }
        target.insert(d);
    }
    Ok(())
}

impl IqrSession {
    /// Serialize the adjudication state to archive bytes.
    ///
    /// The lock is held only while the four ledger sets are copied out;
    /// archive construction happens on the copy after release. Callers must
    /// not assume the lock spans the whole call.
    pub fn export_state(&self) -> SessionResult<Vec<u8>> {
        let doc = self.with_state(|s| StateDoc {
            pos: to_triples(&s.ledger.positive),
            neg: to_triples(&s.ledger.negative),
            external_pos: to_triples(&s.ledger.external_positive),
            external_neg: to_triples(&s.ledger.external_negative),
        });
        encode(&doc)
    }

    /// Replace this session's state with previously exported bytes.
    ///
    /// The session is reset first, then each archived descriptor is
    /// rebuilt through `factory` and added to its ledger set. Working set,
    /// ranker, and scores stay empty — re-run
    /// [`IqrSession::update_working_set`] and [`IqrSession::refine`] to
    /// regenerate them. On failure the session is left reset, with any
    /// sets restored before the failing descriptor already in place.
    pub fn import_state(
        &self,
        bytes: &[u8],
        factory: &dyn IDescriptorFactory,
    ) -> SessionResult<()> {
        let doc = decode(bytes)?;
        self.with_state(|s| {
            s.reset();
            restore_set(&doc.external_pos, factory, &mut s.ledger.external_positive)?;
            restore_set(&doc.external_neg, factory, &mut s.ledger.external_negative)?;
            restore_set(&doc.pos, factory, &mut s.ledger.positive)?;
            restore_set(&doc.neg, factory, &mut s.ledger.negative)?;
            Ok(())
        })
    }
}
