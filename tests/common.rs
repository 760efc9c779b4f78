#![cfg(all(feature = "derive", feature = "std"))]

use std::io::{self, Read};

use tinyvec::ArrayVec;
use wirebin::{
    ByteOrder, Category, CustomDecode, Decode, Decoder, Directive, Encoding, Error, Shape,
    TagOrderingViolation, decode_reader, decode_slice,
};

/// A public key, read as raw bytes without a length prefix.
#[derive(Debug, Default, PartialEq)]
struct Pubkey([u8; 4]);

impl Decode for Pubkey {
    const CATEGORY: Category = Category::Custom;

    fn shape(&mut self) -> Shape<'_> {
        Shape::Custom(self)
    }

    fn zeroed() -> Self {
        Self::default()
    }
}

impl CustomDecode for Pubkey {
    fn decode_custom(&mut self, d: &mut Decoder<'_>, _: &Directive) -> Result<(), Error> {
        self.0.copy_from_slice(d.read_n_bytes(4)?);
        Ok(())
    }
}

/// The most recent samples of a series, prefixed by a compact-u16 count.
#[derive(Debug, Default, PartialEq)]
struct Recent(ArrayVec<[u32; 4]>);

impl Decode for Recent {
    const CATEGORY: Category = Category::Custom;

    fn shape(&mut self) -> Shape<'_> {
        Shape::Custom(self)
    }

    fn zeroed() -> Self {
        Self::default()
    }
}

impl CustomDecode for Recent {
    fn decode_custom(&mut self, d: &mut Decoder<'_>, directive: &Directive) -> Result<(), Error> {
        let count = d.read_compact_u16_length()?;
        let element = Directive::default().with_order(directive.order);

        self.0.clear();
        for _ in 0..count {
            let mut sample = 0u32;
            d.decode_with(&mut sample, &element)?;

            if self.0.len() == self.0.capacity() {
                self.0.remove(0);
            }
            self.0.push(sample);
        }

        Ok(())
    }
}

/// Records whether it was decoded by hand.
#[derive(Debug, Default, PartialEq)]
struct Tracked {
    decoded: bool,
    value: u8,
}

impl Decode for Tracked {
    const CATEGORY: Category = Category::Custom;

    fn shape(&mut self) -> Shape<'_> {
        Shape::Custom(self)
    }

    fn zeroed() -> Self {
        Self::default()
    }
}

impl CustomDecode for Tracked {
    fn decode_custom(&mut self, d: &mut Decoder<'_>, _: &Directive) -> Result<(), Error> {
        self.decoded = true;
        self.value = d.read_u8()?;
        Ok(())
    }
}

#[derive(Debug, Default, PartialEq, Decode)]
struct Vote {
    voter: Pubkey,
    #[bin(big)]
    slots: Recent,
    #[bin(optional)]
    tracked: Tracked,
    #[bin(optional)]
    maybe: Option<Tracked>,
    boxed: Box<Tracked>,
}

#[test]
fn custom_decoders_replace_structural_dispatch() {
    let data = [
        0xaa, 0xbb, 0xcc, 0xdd, // voter
        0x05, 0, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0, 3, 0, 0, 0, 4, 0, 0, 0, 5, // slots
        0x01, 0x07, // tracked
        0x01, 0x08, // maybe
        0x09, // boxed
    ];

    let mut d = Decoder::bin(&data);
    let mut vote = Vote::zeroed();
    d.decode(&mut vote).unwrap();

    assert_eq!(vote.voter, Pubkey([0xaa, 0xbb, 0xcc, 0xdd]));
    assert_eq!(vote.slots.0.as_slice(), &[2, 3, 4, 5]);
    assert_eq!(
        vote.tracked,
        Tracked {
            decoded: true,
            value: 7,
        }
    );
    assert_eq!(
        vote.maybe,
        Some(Tracked {
            decoded: true,
            value: 8,
        })
    );
    assert!(vote.boxed.decoded);
    assert!(!d.has_remaining());
}

#[test]
fn absent_optional_skips_custom_decoder() {
    let data = [
        0x00, 0x00, 0x00, 0x00, // voter
        0x00, // slots
        0x00, // tracked
        0x00, // maybe
        0x09, // boxed
    ];

    let mut vote = Vote {
        tracked: Tracked {
            decoded: true,
            value: 1,
        },
        maybe: Some(Tracked::default()),
        ..Vote::default()
    };
    Decoder::borsh(&data).decode(&mut vote).unwrap();

    assert_eq!(vote.tracked, Tracked::default());
    assert_eq!(vote.maybe, None);
    assert!(vote.slots.0.is_empty());
}

#[test]
fn wide_integer_word_order() {
    let mut data = [0u8; 16];
    data[..8].copy_from_slice(&1u64.to_le_bytes());
    data[8..].copy_from_slice(&2u64.to_le_bytes());

    let value: u128 = decode_slice(&data, Encoding::Bin).unwrap();
    assert_eq!(value, (2u128 << 64) | 1);

    data[..8].copy_from_slice(&2u64.to_be_bytes());
    data[8..].copy_from_slice(&1u64.to_be_bytes());

    let mut value = 0u128;
    Decoder::bin(&data)
        .decode_with(&mut value, &Directive::default().with_order(ByteOrder::Big))
        .unwrap();
    assert_eq!(value, (2u128 << 64) | 1);
}

#[test]
fn optional_wide_integer() {
    let mut data = vec![0x01];
    data.extend((-3i128).to_le_bytes());

    let mut value: Option<i128> = None;
    Decoder::bin(&data)
        .decode_with(&mut value, &Directive::optional())
        .unwrap();
    assert_eq!(value, Some(-3));
}

#[test]
fn decode_from_reader() {
    let data = [0xaa, 0xbb, 0xcc, 0xdd, 0xee];

    let key: Pubkey = decode_reader(&mut &data[..], Encoding::Bin).unwrap();
    assert_eq!(key, Pubkey([0xaa, 0xbb, 0xcc, 0xdd]));
}

struct Broken;

impl Read for Broken {
    fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::other("unplugged"))
    }
}

#[test]
fn reader_errors_propagate() {
    assert!(matches!(
        decode_reader::<Pubkey>(&mut Broken, Encoding::Borsh),
        Err(Error::Io(_))
    ));
}

#[test]
fn errors_display() {
    let error = Error::TruncatedInput {
        required: 4,
        remaining: 1,
    };
    assert_eq!(error.to_string(), "Required 4 bytes, but only 1 remain.");

    let violation = TagOrderingViolation {
        record: "Account",
        field: "owner",
    };
    assert!(violation.to_string().starts_with(
        "TagOrderingViolation: `binary_extension` fields must be packed together at the end of `Account`"
    ));

    let error = decode_slice::<Vec<u8>>(&[0x80], Encoding::Bin).unwrap_err();
    assert_eq!(error.to_string(), "Invalid variable-length integer.");

    let error = Decoder::compact_u16(&[0x80, 0x00]).read_length().unwrap_err();
    assert!(matches!(
        error,
        Error::CompactU16(wirebin::CompactU16Error::Alias)
    ));
}

#[test]
fn opaque_root_is_rejected() {
    let mut value = std::marker::PhantomData::<u32>;
    assert!(matches!(
        Decoder::bin(&[0x01]).decode(&mut value),
        Err(Error::InvalidDestination(_))
    ));
}

#[test]
fn session_position() {
    let data = [0x01, 0x02, 0x03, 0x04];
    let mut d = Decoder::borsh(&data);

    assert_eq!(d.read_u16(ByteOrder::Little).unwrap(), 0x0201);
    assert_eq!(d.position(), 2);
    assert_eq!(d.remaining(), 2);

    d.set_position(4).unwrap();
    assert!(!d.has_remaining());
    assert!(matches!(
        d.set_position(5),
        Err(Error::PositionOutOfBounds {
            position: 5,
            len: 4,
        })
    ));

    d.set_position(0).unwrap();
    assert!(matches!(
        d.read_u64(ByteOrder::Little),
        Err(Error::TruncatedInput { .. })
    ));
    assert_eq!(d.position(), 0);
}
