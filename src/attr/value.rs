use serde::Serialize;

/// Storage kind of one attribute as declared by the procedural engine.
///
/// `Float`/`Float64` behave identically, as do `Int`/`Int64`; the pairs are
/// kept distinct only to round-trip the engine's declaration. `String` is the
/// one genuinely different family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StorageKind {
	/// 32-bit float declaration, stored as f64.
	Float,
	/// 64-bit float declaration.
	Float64,
	/// 32-bit integer declaration, stored as i64.
	Int,
	/// 64-bit integer declaration.
	Int64,
	/// String declaration.
	String,
}

impl StorageKind {
	/// Whether this kind belongs to the floating-point family.
	pub fn is_float(self) -> bool {
		matches!(self, Self::Float | Self::Float64)
	}

	/// Whether this kind belongs to the integer family.
	pub fn is_int(self) -> bool {
		matches!(self, Self::Int | Self::Int64)
	}

	/// Whether this kind is the string family.
	pub fn is_string(self) -> bool {
		matches!(self, Self::String)
	}
}

/// Flat backing sequence for one attribute; exactly one family is populated.
#[derive(Debug, Clone, Serialize)]
pub enum AttrData {
	/// Backing for the float family.
	Float(Vec<f64>),
	/// Backing for the integer family.
	Int(Vec<i64>),
	/// Backing for the string family.
	String(Vec<String>),
}

/// One named, tuple-shaped attribute with typed flat storage.
///
/// Values live in a single flat sequence of length
/// `tuple_size * element_count`; component `n` of element `e` sits at flat
/// index `e * tuple_size + n`. Every getter and setter is total: reads past
/// the backing length return the requested kind's zero value, writes grow
/// the backing sequence as needed.
#[derive(Debug, Clone, Serialize)]
pub struct AttrValue {
	/// Attribute name as declared by the procedural engine.
	pub name: String,
	/// Declared storage kind.
	pub storage: StorageKind,
	/// Number of components per logical element; always at least 1.
	pub tuple_size: usize,
	/// Flat backing sequence matching `storage`'s family.
	pub data: AttrData,
}

impl AttrValue {
	/// Create an empty attribute with backing storage matching `storage`.
	pub fn new(name: impl Into<String>, storage: StorageKind, tuple_size: usize) -> Self {
		let data = match storage {
			StorageKind::Float | StorageKind::Float64 => AttrData::Float(Vec::new()),
			StorageKind::Int | StorageKind::Int64 => AttrData::Int(Vec::new()),
			StorageKind::String => AttrData::String(Vec::new()),
		};
		Self {
			name: name.into(),
			storage,
			tuple_size: tuple_size.max(1),
			data,
		}
	}

	/// Number of whole logical elements currently stored.
	pub fn element_count(&self) -> usize {
		let len = match &self.data {
			AttrData::Float(values) => values.len(),
			AttrData::Int(values) => values.len(),
			AttrData::String(values) => values.len(),
		};
		len / self.tuple_size
	}

	/// Read flat index `index` as a double.
	pub fn double(&self, index: usize) -> f64 {
		match &self.data {
			AttrData::Float(values) => values.get(index).copied().unwrap_or(0.0),
			AttrData::Int(values) => values.get(index).map(|value| *value as f64).unwrap_or(0.0),
			AttrData::String(values) => values.get(index).map(|text| parse_double_prefix(text)).unwrap_or(0.0),
		}
	}

	/// Read flat index `index` as a 64-bit integer.
	pub fn int(&self, index: usize) -> i64 {
		match &self.data {
			AttrData::Int(values) => values.get(index).copied().unwrap_or(0),
			AttrData::Float(values) => values.get(index).map(|value| *value as i64).unwrap_or(0),
			AttrData::String(values) => values.get(index).map(|text| parse_int_prefix(text)).unwrap_or(0),
		}
	}

	/// Read flat index `index` as a string.
	pub fn string(&self, index: usize) -> String {
		match &self.data {
			AttrData::String(values) => values.get(index).cloned().unwrap_or_default(),
			AttrData::Int(values) => values.get(index).map(|value| value.to_string()).unwrap_or_default(),
			AttrData::Float(values) => values.get(index).map(|value| format_double(*value)).unwrap_or_default(),
		}
	}

	/// Read flat index `index` as a boolean.
	pub fn boolean(&self, index: usize) -> bool {
		match &self.data {
			AttrData::Float(values) => values.get(index).is_some_and(|value| *value != 0.0),
			AttrData::Int(values) => values.get(index).is_some_and(|value| *value != 0),
			AttrData::String(values) => values.get(index).is_some_and(|text| text.eq_ignore_ascii_case("true")),
		}
	}

	/// Read element `element_index` as a tuple of doubles, zero-filled.
	pub fn double_tuple(&self, element_index: usize) -> Vec<f64> {
		(0..self.tuple_size).map(|n| self.double(element_index * self.tuple_size + n)).collect()
	}

	/// Read element `element_index` as a tuple of integers, zero-filled.
	pub fn int_tuple(&self, element_index: usize) -> Vec<i64> {
		(0..self.tuple_size).map(|n| self.int(element_index * self.tuple_size + n)).collect()
	}

	/// Read element `element_index` as a tuple of strings, empty-filled.
	pub fn string_tuple(&self, element_index: usize) -> Vec<String> {
		(0..self.tuple_size).map(|n| self.string(element_index * self.tuple_size + n)).collect()
	}

	/// Read element `element_index` as a tuple of booleans, false-filled.
	pub fn bool_tuple(&self, element_index: usize) -> Vec<bool> {
		(0..self.tuple_size).map(|n| self.boolean(element_index * self.tuple_size + n)).collect()
	}

	/// Write a double at flat index `index`, growing the backing sequence.
	pub fn set_double(&mut self, value: f64, index: usize) {
		match &mut self.data {
			AttrData::Float(values) => {
				grow(values, index);
				values[index] = value;
			}
			AttrData::Int(values) => {
				grow(values, index);
				values[index] = value as i64;
			}
			AttrData::String(values) => {
				grow(values, index);
				values[index] = format_double(value);
			}
		}
	}

	/// Write an integer at flat index `index`, growing the backing sequence.
	pub fn set_int(&mut self, value: i64, index: usize) {
		match &mut self.data {
			AttrData::Int(values) => {
				grow(values, index);
				values[index] = value;
			}
			AttrData::Float(values) => {
				grow(values, index);
				values[index] = value as f64;
			}
			AttrData::String(values) => {
				grow(values, index);
				values[index] = value.to_string();
			}
		}
	}

	/// Write a string at flat index `index`, growing the backing sequence.
	pub fn set_string(&mut self, value: &str, index: usize) {
		match &mut self.data {
			AttrData::String(values) => {
				grow(values, index);
				values[index] = value.to_owned();
			}
			AttrData::Int(values) => {
				grow(values, index);
				values[index] = parse_int_prefix(value);
			}
			AttrData::Float(values) => {
				grow(values, index);
				values[index] = parse_double_prefix(value);
			}
		}
	}

	/// Write a boolean at flat index `index`, growing the backing sequence.
	pub fn set_bool(&mut self, value: bool, index: usize) {
		match &mut self.data {
			AttrData::Float(values) => {
				grow(values, index);
				values[index] = if value { 1.0 } else { 0.0 };
			}
			AttrData::Int(values) => {
				grow(values, index);
				values[index] = i64::from(value);
			}
			AttrData::String(values) => {
				grow(values, index);
				values[index] = if value { "true".to_owned() } else { "false".to_owned() };
			}
		}
	}

	/// Write a whole double tuple at element `element_index`.
	///
	/// Silently ignored when `values` is shorter than the tuple size.
	pub fn set_double_tuple(&mut self, values: &[f64], element_index: usize) {
		if values.len() < self.tuple_size {
			return;
		}
		for n in 0..self.tuple_size {
			self.set_double(values[n], element_index * self.tuple_size + n);
		}
	}

	/// Write a whole integer tuple at element `element_index`.
	///
	/// Silently ignored when `values` is shorter than the tuple size.
	pub fn set_int_tuple(&mut self, values: &[i64], element_index: usize) {
		if values.len() < self.tuple_size {
			return;
		}
		for n in 0..self.tuple_size {
			self.set_int(values[n], element_index * self.tuple_size + n);
		}
	}

	/// Write a whole string tuple at element `element_index`.
	///
	/// Silently ignored when `values` is shorter than the tuple size.
	pub fn set_string_tuple(&mut self, values: &[String], element_index: usize) {
		if values.len() < self.tuple_size {
			return;
		}
		for n in 0..self.tuple_size {
			self.set_string(&values[n], element_index * self.tuple_size + n);
		}
	}

	/// Write a whole boolean tuple at element `element_index`.
	///
	/// Silently ignored when `values` is shorter than the tuple size.
	pub fn set_bool_tuple(&mut self, values: &[bool], element_index: usize) {
		if values.len() < self.tuple_size {
			return;
		}
		for n in 0..self.tuple_size {
			self.set_bool(values[n], element_index * self.tuple_size + n);
		}
	}
}

fn grow<T: Default + Clone>(values: &mut Vec<T>, index: usize) {
	if index >= values.len() {
		values.resize(index + 1, T::default());
	}
}

/// Format a double with the shortest representation that round-trips.
fn format_double(value: f64) -> String {
	format!("{value}")
}

/// Parse the leading decimal integer prefix of `text`; unparsable text is 0.
pub(crate) fn parse_int_prefix(text: &str) -> i64 {
	let trimmed = text.trim_start();
	let bytes = trimmed.as_bytes();
	let mut idx = 0_usize;
	if idx < bytes.len() && (bytes[idx] == b'+' || bytes[idx] == b'-') {
		idx += 1;
	}
	let digit_start = idx;
	while idx < bytes.len() && bytes[idx].is_ascii_digit() {
		idx += 1;
	}
	if idx == digit_start {
		return 0;
	}
	trimmed[..idx].parse::<i64>().unwrap_or(0)
}

/// Parse the leading decimal float prefix of `text`; unparsable text is 0.0.
///
/// Locale independent: only `.` is accepted as the decimal separator.
pub(crate) fn parse_double_prefix(text: &str) -> f64 {
	let trimmed = text.trim_start();
	let bytes = trimmed.as_bytes();
	let mut idx = 0_usize;
	if idx < bytes.len() && (bytes[idx] == b'+' || bytes[idx] == b'-') {
		idx += 1;
	}
	let mut saw_digit = false;
	while idx < bytes.len() && bytes[idx].is_ascii_digit() {
		saw_digit = true;
		idx += 1;
	}
	if idx < bytes.len() && bytes[idx] == b'.' {
		idx += 1;
		while idx < bytes.len() && bytes[idx].is_ascii_digit() {
			saw_digit = true;
			idx += 1;
		}
	}
	if !saw_digit {
		return 0.0;
	}
	if idx < bytes.len() && (bytes[idx] == b'e' || bytes[idx] == b'E') {
		let mut exp_idx = idx + 1;
		if exp_idx < bytes.len() && (bytes[exp_idx] == b'+' || bytes[exp_idx] == b'-') {
			exp_idx += 1;
		}
		let exp_digit_start = exp_idx;
		while exp_idx < bytes.len() && bytes[exp_idx].is_ascii_digit() {
			exp_idx += 1;
		}
		if exp_idx > exp_digit_start {
			idx = exp_idx;
		}
	}
	trimmed[..idx].parse::<f64>().unwrap_or(0.0)
}
