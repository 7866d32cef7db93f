// Copyright 2023 Datafuse Labs.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The binary encoding of JSON values.

pub mod constants;
mod de;
mod iterator;
mod raw;
mod ser;

pub use de::decode;
pub use de::from_slice;
pub use iterator::ArrayIterator;
pub use iterator::ObjectIterator;
pub use raw::RawJson;
pub use ser::encode;
pub use ser::Encoder;
