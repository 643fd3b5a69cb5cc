/// Label for the origin end of a conceptual mapping.
/// Example: `UNA CONSTRUCCIÓN`
pub type SourceLabel = String;
/// Label for the destination end of a conceptual mapping.
/// Example: `LA PAZ`
pub type TargetLabel = String;
/// Aggregated occurrence count for a (source, target) flow.
pub type Weight = u64;
/// Zero-based position of a label in the combined node list.
/// Sources occupy `[0, S)`, targets `[S, S + T)`.
pub type NodeId = usize;
/// Keyword used for record-level content matching.
/// Examples: `territorio`, `semilla`, `coca`
pub type Keyword = String;
/// Volume identifier carried through from the corpus.
/// Example: `Tomo 3`
pub type VolumeId = String;
