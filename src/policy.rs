//! Bit-packed parse options. A `Policy` is a single `u32` partitioned into
//! contiguous fields, one per option enum below (a cumulative bit offset per
//! option, computed at compile time, defaults OR'd together at `Policy::new`).

/// Scan strategy. Only `Unchecked`-agnostic code paths are implemented here;
/// all three values are accepted and round-trip through the policy word, but
/// `Simd` and `Runtime` currently select the same scanner as `CompileTime` —
/// true SIMD dispatch is a platform-specific extension this core does not
/// provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecMode {
    #[default]
    CompileTime,
    Runtime,
    Simd,
}

/// Whether the caller promises a sentinel `0` byte immediately past the end
/// of the input, enabling sentinel-aware scans that elide an explicit bounds
/// check on every byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZeroTerminated {
    #[default]
    No,
    Yes,
}

/// Comment dialect accepted between tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Comments {
    #[default]
    None,
    Cpp,
    Hash,
}

/// Bounds/structure validation strictness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Checked {
    #[default]
    Yes,
    No,
}

/// Whether `\` may appear (and must be scanned for) inside object keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AllowEscapedNames {
    #[default]
    No,
    Yes,
}

/// Whether floating point parsing always takes the bit-exact decimal-to-binary
/// slow path, rather than only falling back to it on fast-path overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ieee754Precise {
    #[default]
    No,
    Yes,
}

/// Whether member-name matching always does a full string compare, rather
/// than trusting a hash+length match when the schema's name hashes are known
/// (at schema-construction time) to be collision-free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ForceFullNameCheck {
    #[default]
    No,
    Yes,
}

/// A bit field's `(width, offset)` within the packed word, and the decode/encode
/// of a 2-bit-wide field covers every option below; no field needs more.
const fn mask(width: u32) -> u32 {
    (1u32 << width) - 1
}

// Field widths, in declaration order. Offsets are each field's cumulative
// predecessor width, computed once as compile-time constants.
const W_EXEC_MODE: u32 = 2;
const W_ZERO_TERMINATED: u32 = 1;
const W_COMMENTS: u32 = 2;
const W_CHECKED: u32 = 1;
const W_ALLOW_ESCAPED_NAMES: u32 = 1;
const W_IEEE754_PRECISE: u32 = 1;
const W_FORCE_FULL_NAME_CHECK: u32 = 1;

const O_EXEC_MODE: u32 = 0;
const O_ZERO_TERMINATED: u32 = O_EXEC_MODE + W_EXEC_MODE;
const O_COMMENTS: u32 = O_ZERO_TERMINATED + W_ZERO_TERMINATED;
const O_CHECKED: u32 = O_COMMENTS + W_COMMENTS;
const O_ALLOW_ESCAPED_NAMES: u32 = O_CHECKED + W_CHECKED;
const O_IEEE754_PRECISE: u32 = O_ALLOW_ESCAPED_NAMES + W_ALLOW_ESCAPED_NAMES;
const O_FORCE_FULL_NAME_CHECK: u32 = O_IEEE754_PRECISE + W_IEEE754_PRECISE;

const TOTAL_BITS: u32 = O_FORCE_FULL_NAME_CHECK + W_FORCE_FULL_NAME_CHECK;

const _: () = assert!(TOTAL_BITS <= 32, "policy word overflows its backing u32");

/// The full bit-packed option bundle. `Policy` is `Copy` and fits in a `u32`;
/// it is meant to be constructed once (ideally as a `const`) and passed by
/// value into every parse/serialize call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Policy(u32);

impl Default for Policy {
    fn default() -> Self {
        Policy::new()
    }
}

impl Policy {
    /// All options at their documented defaults: `ExecMode::CompileTime`,
    /// `ZeroTerminated::No`, `Comments::None`, `Checked::Yes`,
    /// `AllowEscapedNames::No`, `Ieee754Precise::No`, `ForceFullNameCheck::No`.
    pub const fn new() -> Policy {
        Policy(0)
            .with_exec_mode(ExecMode::CompileTime)
            .with_zero_terminated(ZeroTerminated::No)
            .with_comments(Comments::None)
            .with_checked(Checked::Yes)
            .with_allow_escaped_names(AllowEscapedNames::No)
            .with_ieee754_precise(Ieee754Precise::No)
            .with_force_full_name_check(ForceFullNameCheck::No)
    }

    const fn set_field(self, offset: u32, width: u32, value: u32) -> Policy {
        let m = mask(width) << offset;
        Policy((self.0 & !m) | ((value << offset) & m))
    }

    const fn get_field(self, offset: u32, width: u32) -> u32 {
        (self.0 >> offset) & mask(width)
    }

    pub const fn with_exec_mode(self, v: ExecMode) -> Policy {
        self.set_field(O_EXEC_MODE, W_EXEC_MODE, v as u32)
    }
    pub const fn exec_mode(self) -> ExecMode {
        match self.get_field(O_EXEC_MODE, W_EXEC_MODE) {
            0 => ExecMode::CompileTime,
            1 => ExecMode::Runtime,
            _ => ExecMode::Simd,
        }
    }

    pub const fn with_zero_terminated(self, v: ZeroTerminated) -> Policy {
        self.set_field(O_ZERO_TERMINATED, W_ZERO_TERMINATED, v as u32)
    }
    pub const fn zero_terminated(self) -> ZeroTerminated {
        match self.get_field(O_ZERO_TERMINATED, W_ZERO_TERMINATED) {
            0 => ZeroTerminated::No,
            _ => ZeroTerminated::Yes,
        }
    }

    pub const fn with_comments(self, v: Comments) -> Policy {
        self.set_field(O_COMMENTS, W_COMMENTS, v as u32)
    }
    pub const fn comments(self) -> Comments {
        match self.get_field(O_COMMENTS, W_COMMENTS) {
            0 => Comments::None,
            1 => Comments::Cpp,
            _ => Comments::Hash,
        }
    }

    pub const fn with_checked(self, v: Checked) -> Policy {
        self.set_field(O_CHECKED, W_CHECKED, v as u32)
    }
    pub const fn checked(self) -> Checked {
        match self.get_field(O_CHECKED, W_CHECKED) {
            0 => Checked::Yes,
            _ => Checked::No,
        }
    }
    pub const fn is_checked(self) -> bool {
        matches!(self.checked(), Checked::Yes)
    }

    pub const fn with_allow_escaped_names(self, v: AllowEscapedNames) -> Policy {
        self.set_field(O_ALLOW_ESCAPED_NAMES, W_ALLOW_ESCAPED_NAMES, v as u32)
    }
    pub const fn allow_escaped_names(self) -> AllowEscapedNames {
        match self.get_field(O_ALLOW_ESCAPED_NAMES, W_ALLOW_ESCAPED_NAMES) {
            0 => AllowEscapedNames::No,
            _ => AllowEscapedNames::Yes,
        }
    }

    pub const fn with_ieee754_precise(self, v: Ieee754Precise) -> Policy {
        self.set_field(O_IEEE754_PRECISE, W_IEEE754_PRECISE, v as u32)
    }
    pub const fn ieee754_precise(self) -> Ieee754Precise {
        match self.get_field(O_IEEE754_PRECISE, W_IEEE754_PRECISE) {
            0 => Ieee754Precise::No,
            _ => Ieee754Precise::Yes,
        }
    }

    pub const fn with_force_full_name_check(self, v: ForceFullNameCheck) -> Policy {
        self.set_field(
            O_FORCE_FULL_NAME_CHECK,
            W_FORCE_FULL_NAME_CHECK,
            v as u32,
        )
    }
    pub const fn force_full_name_check(self) -> ForceFullNameCheck {
        match self.get_field(O_FORCE_FULL_NAME_CHECK, W_FORCE_FULL_NAME_CHECK) {
            0 => ForceFullNameCheck::No,
            _ => ForceFullNameCheck::Yes,
        }
    }

    pub const fn bits(self) -> u32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let p = Policy::new();
        assert_eq!(p.exec_mode(), ExecMode::CompileTime);
        assert_eq!(p.zero_terminated(), ZeroTerminated::No);
        assert_eq!(p.comments(), Comments::None);
        assert_eq!(p.checked(), Checked::Yes);
        assert!(p.is_checked());
        assert_eq!(p.allow_escaped_names(), AllowEscapedNames::No);
        assert_eq!(p.ieee754_precise(), Ieee754Precise::No);
        assert_eq!(p.force_full_name_check(), ForceFullNameCheck::No);
    }

    #[test]
    fn test_override_is_independent_per_field() {
        let p = Policy::new()
            .with_checked(Checked::No)
            .with_comments(Comments::Cpp);
        assert_eq!(p.checked(), Checked::No);
        assert!(!p.is_checked());
        assert_eq!(p.comments(), Comments::Cpp);
        // Untouched fields keep their defaults.
        assert_eq!(p.exec_mode(), ExecMode::CompileTime);
        assert_eq!(p.allow_escaped_names(), AllowEscapedNames::No);
    }

    #[test]
    fn test_all_fields_round_trip() {
        let p = Policy::new()
            .with_exec_mode(ExecMode::Simd)
            .with_zero_terminated(ZeroTerminated::Yes)
            .with_comments(Comments::Hash)
            .with_checked(Checked::No)
            .with_allow_escaped_names(AllowEscapedNames::Yes)
            .with_ieee754_precise(Ieee754Precise::Yes)
            .with_force_full_name_check(ForceFullNameCheck::Yes);

        assert_eq!(p.exec_mode(), ExecMode::Simd);
        assert_eq!(p.zero_terminated(), ZeroTerminated::Yes);
        assert_eq!(p.comments(), Comments::Hash);
        assert_eq!(p.checked(), Checked::No);
        assert_eq!(p.allow_escaped_names(), AllowEscapedNames::Yes);
        assert_eq!(p.ieee754_precise(), Ieee754Precise::Yes);
        assert_eq!(p.force_full_name_check(), ForceFullNameCheck::Yes);
    }

    #[test]
    fn test_const_construction() {
        const P: Policy = Policy::new().with_checked(Checked::No);
        assert!(!P.is_checked());
    }

    #[test]
    fn test_bits_are_stable_and_compact() {
        assert_eq!(Policy::new().bits(), 0);
        assert!(TOTAL_BITS <= 9);
    }
}
