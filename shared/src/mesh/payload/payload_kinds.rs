use std::any::{type_name, TypeId};
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

use lagmesh_serde::{BitReader, BitWrite, Serde, SerdeErr};
use log::warn;

use crate::types::PayloadNetId;

use super::{error::PayloadError, node_payload::NodePayload};

/// The runtime type tag of a payload.
#[derive(Eq, Hash, Copy, Clone, PartialEq, Debug)]
pub struct PayloadKind(TypeId);

impl PayloadKind {
    pub fn of<P: NodePayload>() -> Self {
        Self(TypeId::of::<P>())
    }
}

trait PayloadBuilder: Send + Sync {
    fn read(&self, reader: &mut BitReader) -> Result<Arc<dyn NodePayload>, SerdeErr>;
    fn name(&self) -> &'static str;
}

struct TypedPayloadBuilder<P> {
    phantom: PhantomData<fn() -> P>,
}

impl<P: NodePayload + Serde> PayloadBuilder for TypedPayloadBuilder<P> {
    fn read(&self, reader: &mut BitReader) -> Result<Arc<dyn NodePayload>, SerdeErr> {
        Ok(Arc::new(P::de(reader)?))
    }

    fn name(&self) -> &'static str {
        type_name::<P>()
    }
}

/// Registry of every payload type that may ride on a node record.
///
/// Each registered payload kind is assigned a sequential net id, which is
/// the self-describing type tag written before the payload body on the
/// wire. The wire carries no schema beyond these tags, so every rank of a
/// simulation must register the same payload types in the same order.
pub struct PayloadKinds {
    current_net_id: PayloadNetId,
    kind_map: HashMap<PayloadKind, PayloadNetId>,
    net_id_map: HashMap<PayloadNetId, Box<dyn PayloadBuilder>>,
}

impl PayloadKinds {
    pub fn new() -> Self {
        Self {
            current_net_id: 0,
            kind_map: HashMap::new(),
            net_id_map: HashMap::new(),
        }
    }

    /// Register a payload type, assigning it the next net id.
    ///
    /// # Panics
    /// Panics if the payload type is already registered
    pub fn add_payload<P: NodePayload + Serde>(&mut self) {
        self.try_add_payload::<P>()
            .unwrap_or_else(|error| panic!("{}", error));
    }

    /// Register a payload type, reporting duplicate registration instead of
    /// panicking.
    pub fn try_add_payload<P: NodePayload + Serde>(&mut self) -> Result<(), PayloadError> {
        let kind = PayloadKind::of::<P>();
        if self.kind_map.contains_key(&kind) {
            return Err(PayloadError::DuplicateRegistration {
                payload_name: type_name::<P>(),
            });
        }

        let net_id = self.current_net_id;
        self.current_net_id = self
            .current_net_id
            .checked_add(1)
            .expect("exhausted payload net id space");

        self.kind_map.insert(kind, net_id);
        self.net_id_map.insert(
            net_id,
            Box::new(TypedPayloadBuilder::<P> {
                phantom: PhantomData,
            }),
        );
        Ok(())
    }

    pub fn try_net_id_of(&self, kind: &PayloadKind) -> Result<PayloadNetId, PayloadError> {
        self.kind_map
            .get(kind)
            .copied()
            .ok_or(PayloadError::KindNotFound)
    }

    /// Write the net-id tag for `payload` to the stream.
    ///
    /// # Panics
    /// Panics if the payload's type was never registered
    pub fn write_tag(&self, payload: &dyn NodePayload, writer: &mut dyn BitWrite) {
        let kind = payload.payload_kind();
        let Ok(net_id) = self.try_net_id_of(&kind) else {
            panic!(
                "Payload not registered with Protocol. Must call `add_payload()` during protocol initialization. Payload kind: {:?}",
                kind
            );
        };
        net_id.ser(writer);
    }

    /// Read one tagged payload back from the stream via its registered
    /// builder.
    ///
    /// An unknown tag means the two endpoints were built against different
    /// protocols; the stream cannot be advanced past an unreadable body, so
    /// this is reported as a stream error.
    pub fn read(&self, reader: &mut BitReader) -> Result<Arc<dyn NodePayload>, SerdeErr> {
        let net_id = PayloadNetId::de(reader)?;
        match self.net_id_map.get(&net_id) {
            Some(builder) => builder.read(reader),
            None => {
                warn!("unknown payload net id {} on the wire", net_id);
                Err(SerdeErr)
            }
        }
    }

    /// The registered name of the payload behind a net id, for diagnostics.
    pub fn try_name_of_net_id(&self, net_id: PayloadNetId) -> Result<&'static str, PayloadError> {
        self.net_id_map
            .get(&net_id)
            .map(|builder| builder.name())
            .ok_or(PayloadError::NetIdNotFound { net_id })
    }

    pub fn len(&self) -> usize {
        self.kind_map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kind_map.is_empty()
    }
}

impl Default for PayloadKinds {
    fn default() -> Self {
        Self::new()
    }
}
