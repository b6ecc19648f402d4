use std::any::Any;

use lagmesh_serde::{BitReader, BitWrite, Serde, SerdeErr};
use lagmesh_shared::{GlobalNodeId, NodePayload, PayloadKind, Protocol, RealVector};

/// A spring force connecting this marker to a peer marker.
#[derive(Clone, Debug, PartialEq)]
pub struct SpringForceSpec {
    pub peer: GlobalNodeId,
    pub stiffness: f64,
    pub damping: f64,
    pub rest_length: f64,
}

impl Serde for SpringForceSpec {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.peer.ser(writer);
        self.stiffness.ser(writer);
        self.damping.ser(writer);
        self.rest_length.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(Self {
            peer: GlobalNodeId::de(reader)?,
            stiffness: f64::de(reader)?,
            damping: f64::de(reader)?,
            rest_length: f64::de(reader)?,
        })
    }

    fn bit_length(&self) -> u32 {
        self.peer.bit_length()
            + self.stiffness.bit_length()
            + self.damping.bit_length()
            + self.rest_length.bit_length()
    }
}

impl NodePayload for SpringForceSpec {
    fn payload_kind(&self) -> PayloadKind {
        PayloadKind::of::<Self>()
    }

    fn bit_length_upper_bound(&self) -> u32 {
        Serde::bit_length(self)
    }

    fn ser(&self, writer: &mut dyn BitWrite) {
        Serde::ser(self, writer);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A penalty spring tethering this marker to a fixed anchor point.
#[derive(Clone, Debug, PartialEq)]
pub struct TargetPointSpec {
    pub anchor: RealVector<2>,
    pub kappa: f64,
    pub eta: f64,
}

impl Serde for TargetPointSpec {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.anchor.ser(writer);
        self.kappa.ser(writer);
        self.eta.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(Self {
            anchor: RealVector::de(reader)?,
            kappa: f64::de(reader)?,
            eta: f64::de(reader)?,
        })
    }

    fn bit_length(&self) -> u32 {
        self.anchor.bit_length() + self.kappa.bit_length() + self.eta.bit_length()
    }
}

impl NodePayload for TargetPointSpec {
    fn payload_kind(&self) -> PayloadKind {
        PayloadKind::of::<Self>()
    }

    fn bit_length_upper_bound(&self) -> u32 {
        Serde::bit_length(self)
    }

    fn ser(&self, writer: &mut dyn BitWrite) {
        Serde::ser(self, writer);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Mass and volume carried by a marker for inertial coupling.
#[derive(Clone, Debug, PartialEq)]
pub struct InertiaSpec {
    pub mass: f64,
    pub volume: f64,
}

impl Serde for InertiaSpec {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.mass.ser(writer);
        self.volume.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(Self {
            mass: f64::de(reader)?,
            volume: f64::de(reader)?,
        })
    }

    fn bit_length(&self) -> u32 {
        self.mass.bit_length() + self.volume.bit_length()
    }
}

impl NodePayload for InertiaSpec {
    fn payload_kind(&self) -> PayloadKind {
        PayloadKind::of::<Self>()
    }

    fn bit_length_upper_bound(&self) -> u32 {
        Serde::bit_length(self)
    }

    fn ser(&self, writer: &mut dyn BitWrite) {
        Serde::ser(self, writer);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A payload that advertises a smaller packed size than it writes, to
/// exercise the fatal size-estimation check in the pack path.
#[derive(Clone, Debug, PartialEq)]
pub struct UnderreportingSpec {
    pub value: u64,
}

impl Serde for UnderreportingSpec {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.value.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(Self {
            value: u64::de(reader)?,
        })
    }

    fn bit_length(&self) -> u32 {
        self.value.bit_length()
    }
}

impl NodePayload for UnderreportingSpec {
    fn payload_kind(&self) -> PayloadKind {
        PayloadKind::of::<Self>()
    }

    fn bit_length_upper_bound(&self) -> u32 {
        // deliberately half of what ser() writes
        Serde::bit_length(self) / 2
    }

    fn ser(&self, writer: &mut dyn BitWrite) {
        Serde::ser(self, writer);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// The protocol both "ranks" of a test agree on.
pub fn protocol() -> Protocol {
    let mut protocol = Protocol::builder();
    protocol
        .add_payload::<SpringForceSpec>()
        .add_payload::<TargetPointSpec>()
        .add_payload::<InertiaSpec>()
        .add_payload::<UnderreportingSpec>();
    protocol.lock();
    protocol
}
