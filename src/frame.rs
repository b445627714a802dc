use embedded_can::Id;
#[cfg(feature = "std")]
use std::time::SystemTime;

/// The four slcan frame commands: id width by data/remote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameType {
    /// `t`: 11-bit identifier, data frame.
    StandardData,
    /// `r`: 11-bit identifier, remote frame.
    StandardRemote,
    /// `T`: 29-bit identifier, data frame.
    ExtendedData,
    /// `R`: 29-bit identifier, remote frame.
    ExtendedRemote,
}

impl FrameType {
    pub const fn new(extended: bool, remote: bool) -> Self {
        match (extended, remote) {
            (false, false) => Self::StandardData,
            (false, true) => Self::StandardRemote,
            (true, false) => Self::ExtendedData,
            (true, true) => Self::ExtendedRemote,
        }
    }

    /// Frame type selected by a leading command character.
    pub const fn from_command(command: u8) -> Option<Self> {
        match command {
            b't' => Some(Self::StandardData),
            b'r' => Some(Self::StandardRemote),
            b'T' => Some(Self::ExtendedData),
            b'R' => Some(Self::ExtendedRemote),
            _ => None,
        }
    }

    pub const fn command(self) -> u8 {
        match self {
            Self::StandardData => b't',
            Self::StandardRemote => b'r',
            Self::ExtendedData => b'T',
            Self::ExtendedRemote => b'R',
        }
    }

    pub const fn is_extended(self) -> bool {
        matches!(self, Self::ExtendedData | Self::ExtendedRemote)
    }

    pub const fn is_remote(self) -> bool {
        matches!(self, Self::StandardRemote | Self::ExtendedRemote)
    }

    /// Number of hex digits carrying the identifier.
    pub const fn id_width(self) -> usize {
        if self.is_extended() {
            8
        } else {
            3
        }
    }
}

/// Serial CAN frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    id: Id,
    remote: bool,
    dlc: u8,
    data: [u8; 8],
    #[cfg(feature = "std")]
    timestamp: Option<SystemTime>,
}

impl Frame {
    /// Assemble a frame from already validated parts. `dlc` must be at most 8.
    pub(crate) fn from_parts(id: Id, remote: bool, dlc: u8, data: [u8; 8]) -> Self {
        debug_assert!(dlc <= 8);

        Self {
            id,
            remote,
            dlc,
            data,
            #[cfg(feature = "std")]
            timestamp: None,
        }
    }

    /// Numeric identifier, without the standard/extended distinction.
    pub fn raw_id(&self) -> u32 {
        match self.id {
            Id::Standard(id) => u32::from(id.as_raw()),
            Id::Extended(id) => id.as_raw(),
        }
    }

    pub fn frame_type(&self) -> FrameType {
        FrameType::new(matches!(self.id, Id::Extended(_)), self.remote)
    }

    /// Capture time, only set on frames produced by the stream decoder.
    #[cfg(feature = "std")]
    pub fn timestamp(&self) -> Option<SystemTime> {
        self.timestamp
    }

    #[cfg(feature = "std")]
    pub fn with_timestamp(mut self, timestamp: SystemTime) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    #[cfg(feature = "std")]
    pub fn without_timestamp(mut self) -> Self {
        self.timestamp = None;
        self
    }
}

impl embedded_can::Frame for Frame {
    fn new(id: impl Into<Id>, data: &[u8]) -> Option<Self> {
        if data.len() > 8 {
            return None;
        }

        let mut data_all = [0; 8];
        data_all[0..data.len()].copy_from_slice(data);

        Some(Self::from_parts(id.into(), false, data.len() as u8, data_all))
    }

    fn new_remote(id: impl Into<Id>, dlc: usize) -> Option<Self> {
        if dlc > 8 {
            return None;
        }

        Some(Self::from_parts(id.into(), true, dlc as u8, [0; 8]))
    }

    fn id(&self) -> Id {
        self.id
    }

    fn dlc(&self) -> usize {
        self.dlc as usize
    }

    /// Payload bytes. Empty for remote frames, whatever their dlc.
    fn data(&self) -> &[u8] {
        if self.remote {
            &[]
        } else {
            &self.data[0..self.dlc()]
        }
    }

    fn is_extended(&self) -> bool {
        match self.id {
            Id::Extended(_) => true,
            Id::Standard(_) => false,
        }
    }

    fn is_remote_frame(&self) -> bool {
        self.remote
    }
}
