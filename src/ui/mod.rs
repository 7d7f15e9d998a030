pub(crate) mod report;
pub(crate) mod util;
