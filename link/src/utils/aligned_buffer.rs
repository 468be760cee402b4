/// 对齐的定长缓冲区，帧与包缓冲复用同一块静态内存
#[repr(align(4))]
pub struct AlignedBuffer<const N: usize> {
    buffer: [u8; N],
    len: usize,
}

impl<const N: usize> AlignedBuffer<N> {
    /// 创建一个新的空缓冲区
    pub const fn new() -> Self {
        Self { buffer: [0; N], len: 0 }
    }

    /// 缓冲区容量
    pub const fn capacity(&self) -> usize {
        N
    }

    /// 获取整块缓冲区的可变引用（不受有效长度限制）
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.buffer[..]
    }

    /// 获取整块缓冲区的只读引用
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer[..]
    }

    /// 获取有效数据的只读引用
    pub fn as_slice(&self) -> &[u8] {
        &self.buffer[..self.len]
    }

    /// 读取任意位置的字节
    #[inline]
    pub fn get(&self, index: usize) -> u8 {
        self.buffer[index]
    }

    /// 写入任意位置的字节
    #[inline]
    pub fn set(&mut self, index: usize, byte: u8) {
        self.buffer[index] = byte;
    }

    /// 设置有效数据长度
    pub fn set_len(&mut self, len: usize) {
        assert!(len <= N);
        self.len = len;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// 复制数据到缓冲区偏移处，返回实际复制的字节数
    pub fn copy_from_slice(&mut self, offset: usize, data: &[u8]) -> usize {
        let copy_len = core::cmp::min(N.saturating_sub(offset), data.len());
        self.buffer[offset..offset + copy_len].copy_from_slice(&data[..copy_len]);
        copy_len
    }
}

impl<const N: usize> Default for AlignedBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
