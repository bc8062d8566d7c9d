//! The 32-bit type tag lattice.
//!
//! Every value on the wire is prefixed by one of these tags. The tag is a
//! structured integer (LSB first):
//!
//! ```text
//! ┌────────┬─────────┬───────────┬────────────┬──────────┬─────────┬─────────┬─────────────┐
//! │ eval:1 │ clone:1 │ logical:4 │ physical:6 │ tclone:1 │ tkind:4 │ ikind:4 │ reserved:11 │
//! └────────┴─────────┴───────────┴────────────┴──────────┴─────────┴─────────┴─────────────┘
//! ```
//!
//! Scalars occupy the low 12 bits (`SMASK`), container kinds the next 5
//! (`TMASK`), index annotations the 4 above that (`IMASK`). A homogeneous
//! vector tag is always `scalar | TVEC`; that relationship is the only
//! discriminator of element type.

/// Scalar eval bit shift.
pub const SC_ESHIFT: u32 = 1;
/// Scalar clone bit shift.
pub const SC_CSHIFT: u32 = SC_ESHIFT + 1;
/// Set on scalars that require special evaluation.
pub const SC_EVAL: u32 = 1 << (SC_ESHIFT - 1);
/// Set on scalars that require special cloning.
pub const SC_CLONE: u32 = 1 << (SC_CSHIFT - 1);

/// Container clone bit shift.
pub const T_CSHIFT: u32 = SC_CSHIFT + 10;
/// Set on containers that require special cloning.
pub const T_CLONE: u32 = 1 << T_CSHIFT;

/// Shift to the physical scalar index.
pub const PSHIFT: u32 = SC_CSHIFT + 4;
/// Shift to the container kind field.
pub const TSHIFT: u32 = T_CSHIFT + 1;
/// Logical sub-type mask (4 bits above the scalar flag bits).
pub const LMASK: u32 = 15 << SC_CSHIFT;

// Scalars. Up to 15 logical sub-types per physical type.
pub const NIL: u32 = 0 << PSHIFT; // must be 0
pub const SC_BOOL: u32 = 1 << PSHIFT;
pub const SC_BYTE: u32 = 2 << PSHIFT;
pub const SC_SHORT: u32 = 3 << PSHIFT;
pub const SC_INT: u32 = 4 << PSHIFT;
pub const SC_MONTH: u32 = SC_INT + (1 << SC_CSHIFT);
pub const SC_DATE: u32 = SC_INT + (2 << SC_CSHIFT);
pub const SC_MINUTE: u32 = SC_INT + (3 << SC_CSHIFT);
pub const SC_SECOND: u32 = SC_INT + (4 << SC_CSHIFT);
pub const SC_TIME: u32 = SC_INT + (5 << SC_CSHIFT);
pub const SC_LONG: u32 = 5 << PSHIFT;
pub const SC_TIMESTAMP: u32 = SC_LONG + (1 << SC_CSHIFT);
pub const SC_DATETIME: u32 = SC_LONG + (2 << SC_CSHIFT);
pub const SC_TIMESPAN: u32 = SC_LONG + (3 << SC_CSHIFT);
pub const SC_INT128: u32 = SC_CLONE | (6 << PSHIFT);
pub const SC_REAL: u32 = 8 << PSHIFT;
pub const SC_FLOAT: u32 = 9 << PSHIFT;
pub const SC_QUAD: u32 = SC_CLONE | (10 << PSHIFT);
pub const SC_GUID: u32 = SC_CLONE | (12 << PSHIFT);
pub const SC_ENUM: u32 = 15 << PSHIFT;
pub const SC_SYMBOL: u32 = (20 << PSHIFT) | SC_EVAL;
pub const SC_ALIAS: u32 = SC_SYMBOL + (1 << SC_CSHIFT);
pub const SC_SHADOW: u32 = SC_SYMBOL + (2 << SC_CSHIFT);
pub const SC_CHAR: u32 = 21 << PSHIFT;
pub const SC_UPVAL: u32 = (29 << PSHIFT) | SC_EVAL;
pub const SC_REFTYPE: u32 = (30 << PSHIFT) | SC_EVAL;
pub const SC_REF_APPLY: u32 = SC_REFTYPE + (1 << SC_CSHIFT);
pub const SC_STACKTYPE: u32 = (31 << PSHIFT) | SC_EVAL;
pub const SC_AST: u32 = SC_CLONE | SC_EVAL | (32 << PSHIFT);
pub const SC_EXPR: u32 = SC_AST + (1 << SC_CSHIFT);

/// Full scalar field mask (everything below the container bits).
pub const SMASK: u32 = T_CLONE - 1;
/// Scalar field mask with the flag bits cleared.
pub const STMASK: u32 = SMASK ^ (SC_CLONE | SC_EVAL);

// Container kinds (tclone bit + 4-bit kind field).
pub const TMASK: u32 = 31 << T_CSHIFT;
pub const TSCALAR: u32 = 0 << TSHIFT;
pub const TRAWPTR: u32 = 1 << TSHIFT;
pub const TCOPY: u32 = 4 << TSHIFT;
pub const TVEC: u32 = T_CLONE | (5 << TSHIFT);
pub const TDEQUE: u32 = T_CLONE | (7 << TSHIFT);
pub const TOTHER: u32 = T_CLONE | (15 << TSHIFT);

// Index annotations (4 bits, max 15 index kinds).
pub const ISHIFT: u32 = TSHIFT + 4;
pub const IMASK: u32 = 15 << ISHIFT;
pub const IDX_NONE: u32 = 0 << ISHIFT;
pub const IDX_ASC: u32 = 1 << ISHIFT;
pub const IDX_DESC: u32 = 2 << ISHIFT;
pub const IDX_SKIPLIST: u32 = 3 << ISHIFT;
pub const IDX_MAX: u32 = IDX_SKIPLIST;

// Homogeneous vectors.
pub const VEC_BOOL: u32 = SC_BOOL | TVEC;
pub const VEC_BYTE: u32 = SC_BYTE | TVEC;
pub const VEC_SHORT: u32 = SC_SHORT | TVEC;
pub const VEC_INT: u32 = SC_INT | TVEC;
pub const VEC_MONTH: u32 = SC_MONTH | TVEC;
pub const VEC_DATE: u32 = SC_DATE | TVEC;
pub const VEC_MINUTE: u32 = SC_MINUTE | TVEC;
pub const VEC_SECOND: u32 = SC_SECOND | TVEC;
pub const VEC_TIME: u32 = SC_TIME | TVEC;
pub const VEC_LONG: u32 = SC_LONG | TVEC;
pub const VEC_TIMESTAMP: u32 = SC_TIMESTAMP | TVEC;
pub const VEC_DATETIME: u32 = SC_DATETIME | TVEC;
pub const VEC_TIMESPAN: u32 = SC_TIMESPAN | TVEC;
pub const VEC_INT128: u32 = SC_INT128 | TVEC;
pub const VEC_GUID: u32 = SC_GUID | TVEC;
pub const VEC_REAL: u32 = SC_REAL | TVEC;
pub const VEC_FLOAT: u32 = SC_FLOAT | TVEC;
pub const VEC_QUAD: u32 = SC_QUAD | TVEC;
pub const VEC_REFTYPE: u32 = SC_REFTYPE | TVEC;
pub const VEC_SYMBOL: u32 = SC_SYMBOL | TVEC;
pub const VEC_ALIAS: u32 = SC_ALIAS | TVEC;
pub const VEC_SHADOW: u32 = SC_SHADOW | TVEC;
pub const VEC_CHAR: u32 = SC_CHAR | TVEC;
pub const VEC_ENUM: u32 = SC_ENUM | TVEC;
pub const VEC_UPVAL: u32 = SC_UPVAL | TVEC;
pub const VEC_STACKTYPE: u32 = SC_STACKTYPE | TVEC;
/// Heterogeneous list. An AST-typed vector.
pub const LIST: u32 = SC_AST | TVEC;
/// Heterogeneous expression list.
pub const LIST_EXPR: u32 = SC_EXPR | TVEC;

// Deques. Defined in the lattice but never encoded on the wire.
pub const DEQ_BOOL: u32 = SC_BOOL | TDEQUE;
pub const DEQ_BYTE: u32 = SC_BYTE | TDEQUE;
pub const DEQ_SHORT: u32 = SC_SHORT | TDEQUE;
pub const DEQ_INT: u32 = SC_INT | TDEQUE;
pub const DEQ_MONTH: u32 = SC_MONTH | TDEQUE;
pub const DEQ_DATE: u32 = SC_DATE | TDEQUE;
pub const DEQ_MINUTE: u32 = SC_MINUTE | TDEQUE;
pub const DEQ_SECOND: u32 = SC_SECOND | TDEQUE;
pub const DEQ_TIME: u32 = SC_TIME | TDEQUE;
pub const DEQ_LONG: u32 = SC_LONG | TDEQUE;
pub const DEQ_TIMESTAMP: u32 = SC_TIMESTAMP | TDEQUE;
pub const DEQ_DATETIME: u32 = SC_DATETIME | TDEQUE;
pub const DEQ_TIMESPAN: u32 = SC_TIMESPAN | TDEQUE;
pub const DEQ_INT128: u32 = SC_INT128 | TDEQUE;
pub const DEQ_GUID: u32 = SC_GUID | TDEQUE;
pub const DEQ_REAL: u32 = SC_REAL | TDEQUE;
pub const DEQ_FLOAT: u32 = SC_FLOAT | TDEQUE;
pub const DEQ_QUAD: u32 = SC_QUAD | TDEQUE;
pub const DEQ_REFTYPE: u32 = SC_REFTYPE | TDEQUE;
pub const DEQ_SYMBOL: u32 = SC_SYMBOL | TDEQUE;
pub const DEQ_CHAR: u32 = SC_CHAR | TDEQUE;
pub const DEQ_ENUM: u32 = SC_ENUM | TDEQUE;
pub const DEQ_UPVAL: u32 = SC_UPVAL | TDEQUE;
pub const DEQ_AST: u32 = SC_AST | TDEQUE;

// Executable/copy markers.
pub const MONAD: u32 = (0 << SC_CSHIFT) | TCOPY;
pub const DYAD: u32 = (1 << SC_CSHIFT) | TCOPY;
pub const TRIAD: u32 = (2 << SC_CSHIFT) | TCOPY;
pub const TETRAD: u32 = (3 << SC_CSHIFT) | TCOPY;
pub const POLYAD: u32 = (4 << SC_CSHIFT) | TCOPY;
pub const COMMUTE: u32 = (5 << SC_CSHIFT) | TCOPY;
/// Return-expression list. Shares the list payload shape.
pub const RETURN: u32 = (6 << SC_CSHIFT) | TCOPY | SC_EVAL;
pub const ANY: u32 = (7 << SC_CSHIFT) | TCOPY;
pub const LAMBDA_REC: u32 = (8 << SC_CSHIFT) | TCOPY | SC_EVAL;
pub const TABLE_REF: u32 = (9 << SC_CSHIFT) | TCOPY;
pub const FIELD_REF: u32 = (10 << SC_CSHIFT) | TCOPY;
pub const AST_TYPE: u32 = (11 << SC_CSHIFT) | TCOPY;
pub const PROJECTION: u32 = (12 << SC_CSHIFT) | TCOPY;

// Heterogeneous structures.
pub const LAMBDA: u32 = (0 << SC_CSHIFT) | TOTHER | SC_EVAL;
pub const REAGENT: u32 = (1 << SC_CSHIFT) | TOTHER;
pub const PATTERN: u32 = (2 << SC_CSHIFT) | TOTHER | SC_EVAL;
pub const TABLE: u32 = (3 << SC_CSHIFT) | TOTHER;
pub const DICT: u32 = (4 << SC_CSHIFT) | TOTHER;
pub const SELECT: u32 = (6 << SC_CSHIFT) | TOTHER;
pub const SELECT_C: u32 = (7 << SC_CSHIFT) | TOTHER;
pub const JOIN: u32 = (8 << SC_CSHIFT) | TOTHER;
pub const LJOIN: u32 = (9 << SC_CSHIFT) | TOTHER;
pub const CLOSURE: u32 = (10 << SC_CSHIFT) | TOTHER | SC_EVAL;
pub const TABLE_IDX: u32 = (11 << SC_CSHIFT) | TOTHER;
pub const DICT_TABLE: u32 = (12 << SC_CSHIFT) | TOTHER;
pub const PARSER: u32 = (13 << SC_CSHIFT) | TOTHER;
pub const USERDATA: u32 = (14 << SC_CSHIFT) | TOTHER;
pub const LAMBDA_WEAK: u32 = (15 << SC_CSHIFT) | TOTHER | SC_EVAL;
pub const LIST_WEAK: u32 = (16 << SC_CSHIFT) | TOTHER | SC_EVAL;
pub const ERROR: u32 = (18 << SC_CSHIFT) | TOTHER;
pub const TRACE: u32 = (STMASK - (3 << SC_CSHIFT)) | TOTHER;
pub const BREAKPOINT: u32 = (STMASK - (2 << SC_CSHIFT)) | TOTHER;
pub const INVALID: u32 = (STMASK - (1 << SC_CSHIFT)) | TOTHER;

/// Container kind of a tag.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ContainerKind {
    Scalar,
    RawPtr,
    Copy,
    Vec,
    Deque,
    Other,
}

/// Index annotation of a tag.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IndexKind {
    None,
    Asc,
    Desc,
    SkipList,
}

/// Physical scalar index (the 6-bit field above the flag bits).
pub fn physical(tag: u32) -> u32 {
    (tag & SMASK) >> PSHIFT
}

/// Logical sub-type index (the 4-bit field above the flag bits).
pub fn logical(tag: u32) -> u32 {
    (tag & LMASK) >> SC_CSHIFT
}

/// Container kind, if the kind field holds a defined value.
pub fn container_kind(tag: u32) -> Option<ContainerKind> {
    match tag & TMASK {
        TSCALAR => Some(ContainerKind::Scalar),
        TRAWPTR => Some(ContainerKind::RawPtr),
        TCOPY => Some(ContainerKind::Copy),
        TVEC => Some(ContainerKind::Vec),
        TDEQUE => Some(ContainerKind::Deque),
        TOTHER => Some(ContainerKind::Other),
        _ => None,
    }
}

/// Index kind, if the index field holds a defined value.
pub fn index_kind(tag: u32) -> Option<IndexKind> {
    match tag & IMASK {
        IDX_NONE => Some(IndexKind::None),
        IDX_ASC => Some(IndexKind::Asc),
        IDX_DESC => Some(IndexKind::Desc),
        IDX_SKIPLIST => Some(IndexKind::SkipList),
        _ => None,
    }
}

pub fn is_scalar(tag: u32) -> bool {
    tag & TMASK == TSCALAR
}

pub fn is_vector(tag: u32) -> bool {
    tag & TMASK == TVEC
}

pub fn is_deque(tag: u32) -> bool {
    tag & TMASK == TDEQUE
}

pub fn is_container(tag: u32) -> bool {
    tag & TMASK != TSCALAR
}

/// True for the temporal logical refinements of `SC_INT` and `SC_LONG`,
/// scalar or vector.
pub fn is_temporal(tag: u32) -> bool {
    matches!(
        element_of(tag),
        SC_MONTH
            | SC_DATE
            | SC_MINUTE
            | SC_SECOND
            | SC_TIME
            | SC_TIMESTAMP
            | SC_DATETIME
            | SC_TIMESPAN
    )
}

/// The vector tag holding elements of `scalar`.
pub fn vector_of(scalar: u32) -> u32 {
    scalar | TVEC
}

/// The deque tag holding elements of `scalar`.
pub fn deque_of(scalar: u32) -> u32 {
    scalar | TDEQUE
}

/// The element scalar tag of a vector or deque tag.
pub fn scalar_of(vector: u32) -> u32 {
    vector & !TMASK & !IMASK
}

fn element_of(tag: u32) -> u32 {
    if is_vector(tag) || is_deque(tag) {
        scalar_of(tag)
    } else {
        tag
    }
}

/// True if `tag` is one of the tags the wire codec can produce or consume.
///
/// The wire subset is exact: index bits must be zero, deques and the
/// language-internal scalars and markers are excluded.
pub fn is_wire_tag(tag: u32) -> bool {
    matches!(
        tag,
        NIL | ANY
            | LAMBDA_REC
            | REAGENT
            | SC_BOOL
            | SC_BYTE
            | SC_SHORT
            | SC_INT
            | SC_MONTH
            | SC_DATE
            | SC_MINUTE
            | SC_SECOND
            | SC_TIME
            | SC_ENUM
            | SC_LONG
            | SC_TIMESTAMP
            | SC_DATETIME
            | SC_TIMESPAN
            | SC_REAL
            | SC_FLOAT
            | SC_GUID
            | SC_SYMBOL
            | SC_SHADOW
            | VEC_BOOL
            | VEC_BYTE
            | VEC_SHORT
            | VEC_INT
            | VEC_MONTH
            | VEC_DATE
            | VEC_MINUTE
            | VEC_SECOND
            | VEC_TIME
            | VEC_ENUM
            | VEC_LONG
            | VEC_TIMESTAMP
            | VEC_DATETIME
            | VEC_TIMESPAN
            | VEC_REAL
            | VEC_FLOAT
            | VEC_GUID
            | VEC_SYMBOL
            | VEC_SHADOW
            | VEC_CHAR
            | LIST
            | LIST_EXPR
            | RETURN
            | DICT
            | DICT_TABLE
            | TABLE
            | PATTERN
            | LAMBDA
            | CLOSURE
    )
}
