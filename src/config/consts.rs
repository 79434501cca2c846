/// Side length of the canonical (square) frame the autoencoders are trained on
pub const DEFAULT_IMAGE_SIDE: u32 = 28;
/// Side length of the intermediate warped image before downsampling
pub const DEFAULT_WORKING_SIDE: u32 = 256;

pub const DEFAULT_SETTINGS_FILE: &str = "XenoPi/settings.json";

pub const DEFAULT_RECEIVE_PORT: u16 = 7000;
pub const DEFAULT_XENOPI_PORT: u16 = 7001;
pub const DEFAULT_ORBITER_PORT: u16 = 8001;
/// Largest inbound datagram accepted; begin/step paths can be long
pub const RECEIVE_BUFFER_SIZE: usize = 8192;

/// Prefix of every inbound command address
pub const COMMAND_PREFIX: &str = "/xeno/euglenas";
/// Prefix of every outbound notification address
pub const NOTIFICATION_PREFIX: &str = "/xeno/neurons";

pub const SUFFIX_TRANSFORMED: &str = "_0trn.png";
pub const SUFFIX_FILTERED: &str = "_1fil.png";
pub const SUFFIX_RESOLVED: &str = "_2res.png";
pub const SUFFIX_GENERATED: &str = "_3ann.png";
