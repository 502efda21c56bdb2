/// Build a [`DynamicArray`](crate::DynamicArray) on the system allocator.
///
/// ```
/// use contig_array::dyn_array;
///
/// let listed = dyn_array![1, 2, 3];
/// assert_eq!(listed.capacity(), 3);
///
/// let filled = dyn_array![7; 4];
/// assert_eq!(filled, [7, 7, 7, 7]);
/// ```
#[macro_export]
macro_rules! dyn_array {
    () => {
        $crate::DynamicArray::new()
    };
    ($elem:expr; $n:expr) => {
        $crate::DynamicArray::from_elem($elem, $n)
    };
    ($($x:expr),+ $(,)?) => {
        $crate::DynamicArray::from([$($x),+])
    };
}
