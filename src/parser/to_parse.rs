use std::io::Read;
use std::mem::MaybeUninit;

use byteorder::{BigEndian, ReadBytesExt};

use super::Error;

pub const ALIGNMENT: usize = 4;

#[allow(unused)]
pub trait ToParse: Sized {
    fn parse<R: Read>(src: &mut R) -> Result<Self, Error>;
}

#[allow(unused)]
pub fn parse<T: ToParse, R: Read>(src: &mut R) -> Result<T, Error> {
    T::parse(src)
}

pub fn read_padding<R: Read>(src: &mut R, n: usize) -> Result<(), Error> {
    let mut buf = [0u8; ALIGNMENT];
    let padding = (ALIGNMENT - n % ALIGNMENT) % ALIGNMENT;
    src.read_exact(&mut buf[..padding]).map_err(|_| Error::IncorrectPadding)
}

impl ToParse for u32 {
    fn parse<R: Read>(src: &mut R) -> Result<Self, Error> {
        src.read_u32::<BigEndian>().map_err(|_| Error::IO)
    }
}

impl ToParse for u64 {
    fn parse<R: Read>(src: &mut R) -> Result<Self, Error> {
        src.read_u64::<BigEndian>().map_err(|_| Error::IO)
    }
}

impl ToParse for bool {
    fn parse<R: Read>(src: &mut R) -> Result<Self, Error> {
        let discr = parse::<u32, R>(src)?;
        match discr {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(Error::EnumDiscMismatch),
        }
    }
}

impl<T: ToParse> ToParse for Option<T> {
    fn parse<R: Read>(src: &mut R) -> Result<Self, Error> {
        let disc = parse::<bool, R>(src)?;
        match disc {
            true => Ok(Some(T::parse(src)?)),
            false => Ok(None),
        }
    }
}

impl<const N: usize> ToParse for [u8; N] {
    fn parse<R: Read>(src: &mut R) -> Result<Self, Error> {
        let mut result = [0; N];
        src.read_exact(&mut result).map_err(|_| Error::IO)?;
        read_padding(src, N)?;
        Ok(result)
    }
}

impl<const N: usize, T: ToParse> ToParse for [T; N] {
    fn parse<R: Read>(src: &mut R) -> Result<Self, Error> {
        let mut buf: [MaybeUninit<T>; N] = [const { MaybeUninit::uninit() }; N];

        for elem in buf.iter_mut() {
            elem.write(T::parse(src)?);
        }
        Ok(unsafe { buf.as_ptr().cast::<[T; N]>().read() })
    }
}

impl ToParse for Vec<u8> {
    fn parse<R: Read>(src: &mut R) -> Result<Self, Error> {
        let size = u32::parse(src)?;
        let mut vec = vec![0u8; size as usize];
        src.read_exact(&mut vec).map_err(|_| Error::IO)?;
        read_padding(src, size as usize)?;
        Ok(vec)
    }
}

impl<T: ToParse> ToParse for Vec<T> {
    fn parse<R: Read>(src: &mut R) -> Result<Self, Error> {
        let size = u32::parse(src)?;
        let mut vec = Vec::with_capacity(size as usize);
        for _ in 0..size {
            vec.push(T::parse(src)?);
        }
        Ok(vec)
    }
}
#[allow(dead_code)]
pub struct VecWithMaxLen<const N: u32>(Vec<u8>);
impl<const N: u32> ToParse for VecWithMaxLen<N> {
    fn parse<R: Read>(src: &mut R) -> Result<Self, Error> {
        let size = u32::parse(src)?;
        if size > N {
            return Err(Error::VecTooLong);
        }
        let mut vec = vec![0u8; size as usize];
        src.read_exact(&mut vec).map_err(|_| Error::IO)?;
        read_padding(src, size as usize)?;
        Ok(VecWithMaxLen(vec))
    }
}

#[allow(dead_code)]
pub struct StringWithMaxLen<const N: u32>(String);

impl<const N: u32> ToParse for StringWithMaxLen<N> {
    fn parse<R: Read>(src: &mut R) -> Result<Self, Error> {
        let size = u32::parse(src)?;
        if size > N {
            return Err(Error::StringTooLong);
        }
        let mut vec = vec![0u8; size as usize];
        src.read_exact(&mut vec).map_err(|_| Error::IO)?;
        read_padding(src, size as usize)?;
        Ok(StringWithMaxLen(String::from_utf8(vec).map_err(|_| Error::IncorrectString)?))
    }
}

impl ToParse for String {
    fn parse<R: Read>(src: &mut R) -> Result<Self, Error> {
        let size = u32::parse(src)?;
        let mut vec = vec![0u8; size as usize];
        src.read_exact(&mut vec).map_err(|_| Error::IO)?;
        read_padding(src, size as usize)?;
        String::from_utf8(vec).map_err(|_| Error::IncorrectString)
    }
}

#[macro_export]
macro_rules! parse_struct {
    ($t:ident, $($element:ident),*) => {
        impl ToParse for $t {
            fn parse<R: Read>(src: &mut R) -> Result<Self, Error> {
                Ok($t {$($element: parse(src)?,)*})
            }
        }
    };
}

#[macro_export]
macro_rules! parse_enum {
    ($enum:ident; $($variant:ident = $disc:expr),* $(,)?) => {
        impl ToParse for $enum {
            fn parse<R: Read>(src: &mut R) -> Result<Self, Error> {
                let disc = u32::parse(src)?;
                match disc {
                    $(
                        $disc => Ok(Self::$variant),
                    )*
                    _ => Err(Error::EnumDiscMismatch),
                }
            }
        }
    };
}
