//! Call input encoding for the EVM-style token and router contracts.
//!
//! Arguments follow a 4-byte function selector as 32-byte big-endian
//! words. Dynamic arrays use the standard head/tail layout: the head word
//! holds the byte offset of the array data, which starts with a length
//! word.

use stampede_types::Address;

/// `mint()`
pub const MINT: [u8; 4] = [0x12, 0x49, 0xc5, 0x8b];
/// `approve(address,uint256)`
pub const APPROVE: [u8; 4] = [0x09, 0x5e, 0xa7, 0xb3];
/// `transfer(address,uint256)`
pub const TRANSFER: [u8; 4] = [0xa9, 0x05, 0x9c, 0xbb];
/// `addLiquidity(address,address,uint256,uint256,uint256,uint256,address,uint256)`
pub const ADD_LIQUIDITY: [u8; 4] = [0xe8, 0xe3, 0x37, 0x00];
/// `swapExactTokensForTokens(uint256,uint256,address[],address,uint256)`
pub const SWAP_EXACT_TOKENS_FOR_TOKENS: [u8; 4] = [0x38, 0xed, 0x17, 0x39];

/// Scale a whole-token amount by `10^decimals`.
pub fn parse_units(amount: u128, decimals: u32) -> u128 {
    amount * 10u128.pow(decimals)
}

enum Arg {
    Word([u8; 32]),
    AddressArray(Vec<Address>),
}

/// Builder for one contract call's input bytes.
pub struct CallBuilder {
    selector: [u8; 4],
    args: Vec<Arg>,
}

impl CallBuilder {
    pub fn new(selector: [u8; 4]) -> Self {
        Self {
            selector,
            args: Vec::new(),
        }
    }

    /// Append an address argument, left-padded to a word.
    pub fn address(mut self, address: Address) -> Self {
        self.args.push(Arg::Word(address_word(&address)));
        self
    }

    /// Append an unsigned integer argument.
    pub fn uint(mut self, value: u128) -> Self {
        self.args.push(Arg::Word(uint_word(value)));
        self
    }

    /// Append a dynamic address array argument.
    pub fn address_array(mut self, addresses: &[Address]) -> Self {
        self.args.push(Arg::AddressArray(addresses.to_vec()));
        self
    }

    /// Encode the selector, the argument head, and any dynamic tails.
    pub fn build(self) -> Vec<u8> {
        let head_words = self.args.len();
        let mut head = Vec::with_capacity(4 + 32 * head_words);
        let mut tail: Vec<u8> = Vec::new();

        head.extend_from_slice(&self.selector);
        for arg in &self.args {
            match arg {
                Arg::Word(word) => head.extend_from_slice(word),
                Arg::AddressArray(addresses) => {
                    // Offsets count from the start of the head, selector
                    // excluded.
                    let offset = 32 * head_words + tail.len();
                    head.extend_from_slice(&uint_word(offset as u128));
                    tail.extend_from_slice(&uint_word(addresses.len() as u128));
                    for address in addresses {
                        tail.extend_from_slice(&address_word(address));
                    }
                }
            }
        }
        head.extend_from_slice(&tail);
        head
    }
}

fn address_word(address: &Address) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[12..].copy_from_slice(address.as_bytes());
    word
}

fn uint_word(value: u128) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[16..].copy_from_slice(&value.to_be_bytes());
    word
}
